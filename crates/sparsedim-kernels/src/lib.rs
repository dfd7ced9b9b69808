//! Elementwise kernels for sparsedim (pure Rust, parallel ready)

pub mod cleanup;
pub mod elementwise;
pub mod transform;
pub mod utility;

pub use cleanup::prune_default;
pub use elementwise::add::add_nd;
pub use elementwise::divide::div_scalar_nd;
pub use elementwise::multiply::mul_scalar_nd;
pub use elementwise::remainder::rem_scalar_nd;
pub use elementwise::subtract::sub_nd;
pub use transform::transform_nd;
pub use utility::util::SMALL_NNZ_LIMIT;

/// Configure the global rayon pool used by the kernels.
///
/// Without this call rayon picks its own thread count (and honours
/// `RAYON_NUM_THREADS`). `None` keeps that default.
///
/// # Errors
/// Fails if the global pool was already built.
pub fn init_parallel(num_threads: Option<usize>) -> Result<(), rayon::ThreadPoolBuildError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = num_threads {
        builder = builder.num_threads(n);
    }
    builder.build_global()
}
