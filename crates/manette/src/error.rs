use manette_gamepad::DeviceIdentity;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Gamepad(#[from] manette_gamepad::Error),
    #[error("no input device matches {0}")]
    NotFound(DeviceIdentity),
    #[error("gamepad at {0} can't be read")]
    Unusable(String),
    #[error("can't set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("waiting for gamepad events failed: {0}")]
    Poll(#[from] std::io::Error),
}
