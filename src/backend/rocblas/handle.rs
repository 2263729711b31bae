//! rocBLAS handle wrapper

use std::ffi::c_void;
use std::ptr;

use tracing::error;

use crate::backend::rocblas::error::{BackendError, BackendResult};
use crate::backend::rocblas::ffi;

/// RAII wrapper around a rocBLAS handle.
#[derive(Debug)]
pub struct RocblasHandle {
    handle: *mut c_void,
}

impl RocblasHandle {
    pub fn new() -> BackendResult<Self> {
        let mut handle: *mut c_void = ptr::null_mut();
        let status = unsafe { ffi::rocblas_create_handle(&mut handle) };
        if status != ffi::ROCBLAS_STATUS_SUCCESS {
            return Err(BackendError::InitializationFailed(status));
        }
        Ok(RocblasHandle { handle })
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.handle
    }

    /// Read alpha/beta from host memory rather than device memory.
    pub fn set_pointer_mode_host(&self) -> BackendResult<()> {
        let status = unsafe {
            ffi::rocblas_set_pointer_mode(self.handle, ffi::ROCBLAS_POINTER_MODE_HOST)
        };
        if status != ffi::ROCBLAS_STATUS_SUCCESS {
            return Err(BackendError::RocblasCallFailed {
                call: "rocblas_set_pointer_mode",
                status,
            });
        }
        Ok(())
    }
}

impl Drop for RocblasHandle {
    fn drop(&mut self) {
        let status = unsafe { ffi::rocblas_destroy_handle(self.handle) };
        if status != ffi::ROCBLAS_STATUS_SUCCESS {
            error!("rocblas_destroy_handle failed with status {}", status);
        }
    }
}
