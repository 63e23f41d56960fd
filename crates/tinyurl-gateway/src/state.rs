use tinyurl_core::Store;
use tinyurl_generator::Generator;
use tinyurl_shortener::TinyUrl;

pub struct AppState<S, G> {
    shortener: TinyUrl<S, G>,
}

impl<S, G> Clone for AppState<S, G> {
    fn clone(&self) -> Self {
        Self {
            shortener: self.shortener.clone(),
        }
    }
}

impl<S: Store, G: Generator> AppState<S, G> {
    pub fn new(shortener: TinyUrl<S, G>) -> Self {
        Self { shortener }
    }

    pub fn shortener(&self) -> &TinyUrl<S, G> {
        &self.shortener
    }
}
