/// Polls the OS cursor position for live sessions. Only Windows is wired
/// up; other platforms report no position and callers fall back to
/// synthetic input.
#[cfg(target_os = "windows")]
pub fn current_pointer_position() -> Option<(f32, f32)> {
    use windows_sys::Win32::Foundation::POINT;
    use windows_sys::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut point = POINT { x: 0, y: 0 };
    let ok = unsafe { GetCursorPos(&mut point as *mut POINT) };
    if ok == 0 {
        None
    } else {
        Some((point.x as f32, point.y as f32))
    }
}

#[cfg(not(target_os = "windows"))]
pub fn current_pointer_position() -> Option<(f32, f32)> {
    None
}
