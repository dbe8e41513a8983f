pub mod browser_opener;
