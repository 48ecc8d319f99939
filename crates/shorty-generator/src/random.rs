use crate::Generator;
use rand::distr::Alphanumeric;
use rand::{Rng, RngCore};
use shorty_core::ShortCode;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 8;

/// Stateless generator drawing codes uniformly from `[A-Za-z0-9]`.
///
/// 62^8 possible codes keeps collisions rare enough to be handled as an
/// error path by the repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Call at startup so any OS entropy blocking happens before serving.
    /// Only warms the current thread; every thread seeds its own RNG on first use.
    pub fn warm_up() {
        let mut rng = rand::rng();
        std::hint::black_box(rng.next_u32());
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
