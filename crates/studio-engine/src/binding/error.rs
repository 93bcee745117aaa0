#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// The engine module could not be fetched or instantiated.
    #[error("failed to load engine module: {0}")]
    ModuleLoad(String),
    /// The module loaded but handed back a null instance.
    #[error("engine module returned no instance")]
    CreateFailed,
    /// The canvas has no usable GPU context.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
