use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::redirect;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed delay between catalog page fetches, in place of a crawl
/// framework's autothrottle.
const CRAWL_DELAY: Duration = Duration::from_millis(1500);

pub fn build_client() -> Result<Client> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > 10 {
            attempt.error("Too many redirects (>10)")
        } else {
            attempt.follow()
        }
    });

    let client = Client::builder()
        .redirect(redirect_policy)
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    Ok(client)
}

pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let text = client.get(url).send()?.error_for_status()?.text()?;
    Ok(text)
}

pub fn throttle() {
    std::thread::sleep(CRAWL_DELAY);
}
