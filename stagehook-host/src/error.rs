use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("plugin '{name}' is already registered")]
    DuplicatePlugin { name: &'static str },
}
