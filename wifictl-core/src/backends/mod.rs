pub mod nmcli;

#[cfg(any(test, feature = "backend_mock"))]
pub mod mock;
