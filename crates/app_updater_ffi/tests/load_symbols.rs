use app_updater_ffi::api::bootstrap_report;
use app_updater_ffi::{JNI_OnLoad, JNI_OnUnload};
use std::ptr;

const JNI_EINVAL: i32 = -6;

#[test]
fn null_vm_is_rejected_and_recorded_in_report() {
    let status = JNI_OnLoad(ptr::null_mut(), ptr::null_mut());
    assert_eq!(status, JNI_EINVAL);

    let report: serde_json::Value =
        serde_json::from_str(&bootstrap_report()).expect("report should be JSON");
    assert_eq!(report["load_state"], "unloaded");
    assert_eq!(report["last_status"], JNI_EINVAL);
    assert!(report["load_attempts"].as_u64().unwrap_or(0) >= 1);

    JNI_OnUnload(ptr::null_mut(), ptr::null_mut());
    let report: serde_json::Value =
        serde_json::from_str(&bootstrap_report()).expect("report should be JSON");
    assert_eq!(report["load_state"], "unloaded");
}
