/// Number of weights of a 3x3 kernel.
pub const KERNEL_3X3_LEN: usize = 9;

/// Create the identity 3x3 kernel.
///
/// # Returns
///
/// A row-major kernel with a single unit weight at the center.
pub fn identity_kernel() -> [f32; KERNEL_3X3_LEN] {
    let mut kernel = [0.0; KERNEL_3X3_LEN];
    kernel[4] = 1.0;
    kernel
}

/// Create a 3x3 box blur kernel.
///
/// # Returns
///
/// A row-major kernel with nine weights of `1 / 9`.
pub fn box_kernel() -> [f32; KERNEL_3X3_LEN] {
    [1.0 / KERNEL_3X3_LEN as f32; KERNEL_3X3_LEN]
}

/// Create a sharpen kernel.
///
/// # Arguments
///
/// * `amount` - The sharpen strength, usually in [0, 1].
///
/// # Returns
///
/// The kernel `[0, -a, 0; -a, 1 + 4a, -a; 0, -a, 0]`, whose weights sum to one.
#[rustfmt::skip]
pub fn sharpen_kernel(amount: f32) -> [f32; KERNEL_3X3_LEN] {
    let a = amount;
    [
        0.0, -a,             0.0,
        -a,  1.0 + 4.0 * a,  -a,
        0.0, -a,             0.0,
    ]
}
