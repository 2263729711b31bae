//! Device buffer wrapper
//!
//! RAII wrapper over hipMalloc/hipFree. Buffers live for a single
//! verification run and have exactly one owner, so no reference counting is
//! needed; Drop releases the device memory.

use std::ffi::c_void;
use std::ptr;

use tracing::{error, trace};

use crate::backend::rocblas::error::{BackendError, BackendResult};
use crate::backend::rocblas::ffi;

/// Owned device memory allocation.
#[derive(Debug)]
pub struct DeviceBuffer {
    ptr: *mut c_void,
    size: usize,
}

// SAFETY: DeviceBuffer is a uniquely-owned raw device pointer; all access
// goes through hipMemcpy, which is thread-safe.
unsafe impl Send for DeviceBuffer {}

impl DeviceBuffer {
    /// Allocate `size` bytes of device memory.
    pub fn new(size: usize) -> BackendResult<Self> {
        trace!("DeviceBuffer::new: allocating {} bytes", size);
        let mut ptr: *mut c_void = ptr::null_mut();
        let status = unsafe { ffi::hipMalloc(&mut ptr, size) };
        if status != ffi::HIP_SUCCESS {
            error!("hipMalloc failed with code {} for {} bytes", status, size);
            return Err(BackendError::MemoryAllocationFailed(format!(
                "hipMalloc returned {} for {} bytes",
                status, size
            )));
        }
        if ptr.is_null() {
            return Err(BackendError::MemoryAllocationFailed(format!(
                "hipMalloc returned null pointer for {} bytes",
                size
            )));
        }
        Ok(DeviceBuffer { ptr, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }

    /// Copy `data` from host to device.
    pub fn copy_from_host<T: Copy>(&self, data: &[T]) -> BackendResult<()> {
        let byte_size = std::mem::size_of_val(data);
        if byte_size > self.size {
            return Err(BackendError::MemoryCopyFailed(format!(
                "host buffer of {} bytes exceeds device buffer of {} bytes",
                byte_size, self.size
            )));
        }
        let status = unsafe {
            ffi::hipMemcpy(
                self.ptr,
                data.as_ptr() as *const c_void,
                byte_size,
                ffi::HIP_MEMCPY_HOST_TO_DEVICE,
            )
        };
        if status != ffi::HIP_SUCCESS {
            return Err(BackendError::MemoryCopyFailed(format!(
                "hipMemcpy host-to-device returned {}",
                status
            )));
        }
        Ok(())
    }

    /// Copy the device contents into `data`, blocking until the device has
    /// finished producing them.
    pub fn copy_to_host<T: Copy>(&self, data: &mut [T]) -> BackendResult<()> {
        let byte_size = std::mem::size_of_val(data);
        if byte_size > self.size {
            return Err(BackendError::MemoryCopyFailed(format!(
                "host buffer of {} bytes exceeds device buffer of {} bytes",
                byte_size, self.size
            )));
        }
        let status = unsafe {
            ffi::hipMemcpy(
                data.as_mut_ptr() as *mut c_void,
                self.ptr,
                byte_size,
                ffi::HIP_MEMCPY_DEVICE_TO_HOST,
            )
        };
        if status != ffi::HIP_SUCCESS {
            return Err(BackendError::MemoryCopyFailed(format!(
                "hipMemcpy device-to-host returned {}",
                status
            )));
        }
        Ok(())
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        let status = unsafe { ffi::hipFree(self.ptr) };
        if status != ffi::HIP_SUCCESS {
            error!("hipFree failed with code {} for {:?}", status, self.ptr);
        }
    }
}
