/// Domain interface for handing a URL to the user's default browser.
pub trait LinkOpener: Send {
    fn open(&mut self, url: &str) -> Result<(), Box<dyn std::error::Error>>;
}
