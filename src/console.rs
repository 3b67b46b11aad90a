use crate::dom::PageRef;

/// `(message, css)` pairs written with `%c` styling when the page loads.
pub const GREETING: [(&str, &str); 3] = [
    (
        "🚀 Looking to hire? Let's talk!",
        "font-size: 20px; font-weight: bold; color: #6366f1;",
    ),
    ("📧 abinishjha@gmail.com", "font-size: 14px; color: #a855f7;"),
    ("🔗 github.com/abinishjha1", "font-size: 14px; color: #8b5cf6;"),
];

pub fn print_greeting(page: &PageRef) {
    for (message, style) in GREETING {
        page.console_styled(message, style);
    }
}
