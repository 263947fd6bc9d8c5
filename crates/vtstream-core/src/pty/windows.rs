use vtstream_common::error::{VtError, Result};
use portable_pty::MasterPty;

/// Async I/O wrapper for Windows PTY (stub implementation)
pub struct AsyncPtyIo;

impl AsyncPtyIo {
    pub fn new(_master: &Box<dyn MasterPty + Send>) -> Result<Self> {
        Err(VtError::Platform(
            "Windows PTY support not yet implemented".to_string()
        ))
    }
    
    pub async fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(VtError::Platform(
            "Windows PTY read not yet implemented".to_string()
        ))
    }
    
    pub async fn write(&mut self, _data: &[u8]) -> Result<usize> {
        Err(VtError::Platform(
            "Windows PTY write not yet implemented".to_string()
        ))
    }
}