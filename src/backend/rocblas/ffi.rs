//! HIP and rocBLAS FFI bindings
//!
//! Only the subset this crate calls. All functions are used through the safe
//! wrappers in `memory`, `handle`, and `provider`; the dead_code allowance
//! covers symbols the compiler cannot see being called from unsafe blocks.

use std::ffi::c_void;

#[link(name = "amdhip64")]
#[allow(dead_code)]
extern "C" {
    pub fn hipMalloc(ptr: *mut *mut c_void, size: usize) -> i32;
    pub fn hipFree(ptr: *mut c_void) -> i32;
    pub fn hipMemcpy(dst: *mut c_void, src: *const c_void, count: usize, kind: i32) -> i32;
    pub fn hipDeviceSynchronize() -> i32;
    pub fn hipGetErrorString(error: i32) -> *const i8;
}

#[link(name = "rocblas")]
#[allow(dead_code)]
extern "C" {
    pub fn rocblas_create_handle(handle: *mut *mut c_void) -> i32;
    pub fn rocblas_destroy_handle(handle: *mut c_void) -> i32;
    pub fn rocblas_set_pointer_mode(handle: *mut c_void, mode: i32) -> i32;
    pub fn rocblas_gemm_ex(
        handle: *mut c_void,
        trans_a: i32,
        trans_b: i32,
        m: i32,
        n: i32,
        k: i32,
        alpha: *const c_void,
        a: *const c_void,
        a_type: i32,
        lda: i32,
        b: *const c_void,
        b_type: i32,
        ldb: i32,
        beta: *const c_void,
        c: *const c_void,
        c_type: i32,
        ldc: i32,
        d: *mut c_void,
        d_type: i32,
        ldd: i32,
        compute_type: i32,
        algo: i32,
        solution_index: i32,
        flags: u32,
    ) -> i32;
}

/// HIP memory copy kinds
pub const HIP_MEMCPY_HOST_TO_DEVICE: i32 = 1;
pub const HIP_MEMCPY_DEVICE_TO_HOST: i32 = 2;

/// HIP success code
pub const HIP_SUCCESS: i32 = 0;

/// rocBLAS status codes
pub const ROCBLAS_STATUS_SUCCESS: i32 = 0;

/// rocBLAS operation tags
pub const ROCBLAS_OPERATION_NONE: i32 = 111;
pub const ROCBLAS_OPERATION_TRANSPOSE: i32 = 112;

/// rocBLAS datatype tags (real types)
pub const ROCBLAS_DATATYPE_F16_R: i32 = 150;
pub const ROCBLAS_DATATYPE_F32_R: i32 = 151;

/// rocBLAS pointer modes
pub const ROCBLAS_POINTER_MODE_HOST: i32 = 0;

/// rocBLAS algorithm selectors
pub const ROCBLAS_GEMM_ALGO_STANDARD: i32 = 0;
