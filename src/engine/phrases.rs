//! Canned assistant reply phrases
//!
//! Every reply the engine produces uses one of these fixed strings or
//! templates, so the presentation layer (and the tests) can match on them
//! exactly.

/// Greeting shown when a conversation starts
pub const WELCOME: &str = "Hello! I'm your AI scraping assistant. To get started, please set a URL to scrape, then you can ask me to extract data from that website.";

/// Reply when a query arrives before any URL has been set
pub const NO_URL: &str = "Please set a URL to scrape first.";

/// Reply when the scrape ran but produced no records
pub const NO_DATA: &str = "I was unable to extract any data from this website. Please try a different URL or be more specific about what data you need.";

/// Reply when the provider failed outright
pub const PROCESSING_ERROR: &str = "I encountered an error while processing your request. Please try again with a different URL or query.";

/// Acknowledgment for a location-filtered result set
pub fn filtered_ack(location: &str) -> String {
    format!(
        "I've filtered the data to show only results with location containing '{}'. Here are the results:",
        location
    )
}

/// Acknowledgment for a full retrieval
pub fn full_retrieval_ack(url: &str) -> String {
    format!("I've retrieved data from {}. Here are the results:", url)
}

/// Default acknowledgment when no more specific phrasing applies
pub fn generic_ack(url: &str) -> String {
    format!(
        "I've processed your request and extracted data from {}. Here are the results:",
        url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_ack_names_the_filter() {
        let text = filtered_ack("MOTT ND");
        assert!(text.contains("'MOTT ND'"));
        assert!(text.ends_with("Here are the results:"));
    }

    #[test]
    fn test_retrieval_acks_name_the_url() {
        let url = "https://example.com/listings";
        assert!(full_retrieval_ack(url).contains(url));
        assert!(generic_ack(url).contains(url));
    }

    #[test]
    fn test_fixed_phrases_are_distinct() {
        let phrases = [WELCOME, NO_URL, NO_DATA, PROCESSING_ERROR];
        for (i, a) in phrases.iter().enumerate() {
            for b in phrases.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
