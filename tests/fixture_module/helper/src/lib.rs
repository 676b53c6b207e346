//! Dependency artifact loaded alongside the fixture module. It exports no
//! module entry point of its own, so the loader links it without recursing.

#[no_mangle]
pub extern "C" fn fixture_helper_magic() -> i32 {
    7
}
