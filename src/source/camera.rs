//! Module probing for a photo capture capability.
//!
//! Actual capture surfaces are owned by the host platform; what the
//! editor needs is only the answer to "can the camera action be
//! offered at all?", probed once per screen activation.

use std::path::PathBuf;


/// Check whether a photo capture device is present.
pub fn is_available() -> bool {
    match device() {
        Some(path) => {
            trace!("Found capture device at {}", path.display());
            true
        }
        None => {
            trace!("No capture device found");
            false
        }
    }
}

/// Path to the first capture device node, if any.
///
/// Hosts that implement a camera `MediaPicker` can use this to decide
/// which device to drive.
pub fn device() -> Option<PathBuf> {
    first_device_node()
}


#[cfg(target_os = "linux")]
const DEVICE_PROBE_LIMIT: u32 = 8;

#[cfg(target_os = "linux")]
fn first_device_node() -> Option<PathBuf> {
    (0..DEVICE_PROBE_LIMIT)
        .map(|i| PathBuf::from(format!("/dev/video{}", i)))
        .find(|path| path.exists())
}

#[cfg(not(target_os = "linux"))]
fn first_device_node() -> Option<PathBuf> {
    None
}
