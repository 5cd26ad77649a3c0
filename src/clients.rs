use std::sync::OnceLock;

use color_eyre::eyre::{eyre, Result};
use google_maps::GoogleMapsClient;

pub static GMAPS: OnceLock<GoogleMapsClient> = OnceLock::new();
pub static GOOGLE_API_KEY: OnceLock<String> = OnceLock::new();
pub static REQWEST: OnceLock<reqwest::Client> = OnceLock::new();

pub fn get_google_maps() -> Result<&'static GoogleMapsClient> {
    GMAPS.get().ok_or(eyre!("Failed to get google maps"))
}

pub fn get_google_api_key() -> Result<&'static String> {
    GOOGLE_API_KEY
        .get()
        .ok_or(eyre!("Failed to get google api key"))
}

pub fn get_reqwest_client() -> Result<&'static reqwest::Client> {
    REQWEST.get().ok_or(eyre!("Failed to get reqwest client"))
}
