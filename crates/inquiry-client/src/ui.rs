//! Page behaviour outside the form, as pure functions over scroll positions
//! and select values.

/// Scroll offset after which the scroll-to-top control appears
pub const SCROLL_TO_TOP_THRESHOLD: f64 = 300.0;

/// Height of the fixed header that anchor targets must clear
pub const HEADER_OFFSET: f64 = 80.0;

/// Canned messages offered when a service is picked and the message is blank
pub const SERVICE_MESSAGES: &[(&str, &str)] = &[
    (
        "bookkeeping",
        "I'm interested in your Basic Monthly Bookkeeping services. Please provide more details about what's included and how we can get started.",
    ),
    (
        "cfo",
        "I'd like to learn more about your Standard CFO Package. My business could benefit from financial analysis and strategic planning support.",
    ),
    (
        "premium",
        "I'm interested in your Premium Advisory services for comprehensive CFO support and business growth consulting.",
    ),
    (
        "consultation",
        "I'd like to schedule a free consultation to discuss my business's financial needs and how you can help.",
    ),
];

pub fn scroll_to_top_visible(page_offset: f64) -> bool {
    page_offset > SCROLL_TO_TOP_THRESHOLD
}

/// Where to scroll so an in-page anchor lands just below the header
///
/// `element_top` is relative to the viewport.
pub fn anchor_scroll_target(element_top: f64, page_offset: f64) -> f64 {
    element_top + page_offset - HEADER_OFFSET
}

pub fn service_message(service: &str) -> Option<&'static str> {
    SERVICE_MESSAGES
        .iter()
        .find(|(key, _)| *key == service)
        .map(|(_, message)| *message)
}
