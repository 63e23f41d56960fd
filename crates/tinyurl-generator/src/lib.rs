pub mod random;
pub mod seq;

pub use crate::random::NanoidGenerator;
pub use crate::seq::SeqGenerator;

use tinyurl_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// The shortener retries on collision, but a generator that keeps
/// repeating itself will exhaust those retries.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a value that can be converted into an effectively unique short code.
    fn generate(&self) -> Self::Output;
}

/// Any thread-safe `Fn() -> impl Into<ShortCode>` is a generator.
impl<F, O> Generator for F
where
    F: Fn() -> O + Send + Sync + 'static,
    O: Into<ShortCode>,
{
    type Output = O;

    fn generate(&self) -> Self::Output {
        self()
    }
}
