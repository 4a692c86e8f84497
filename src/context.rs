use crate::traits::{FileSystem, Output, RealFileSystem, TerminalOutput};
use std::sync::Arc;

/// Filesystem and terminal seams handed to every command
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
}

impl Context {
    /// Context backed by the real filesystem and terminal
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
        }
    }

    /// Context over caller-supplied seams, usually mocks
    #[cfg(test)]
    pub fn test_with(fs: Arc<dyn FileSystem>, output: Arc<dyn Output>) -> Self {
        Self { fs, output }
    }
}
