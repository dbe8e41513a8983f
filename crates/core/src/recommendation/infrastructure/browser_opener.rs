use crate::recommendation::domain::link_opener::LinkOpener;

/// Opens links with the platform's default browser.
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) -> Result<(), Box<dyn std::error::Error>> {
        open::that(url)?;
        Ok(())
    }
}
