//! Server-rendered HTML for the catalog and booking pages.

use std::fmt::Write;
use voyage_catalog::{Trip, TripCatalog};
use voyage_core::{BookingDraft, BookingField, BookingView, SubmissionOutcome};

/// Disables the submit button as the form goes out so a double click cannot
/// post the same booking twice.
pub const SUBMIT_GUARD: &str = "var b=this.querySelector('button[type=submit]');if(b.disabled){return false;}b.disabled=true;b.textContent='Booking...';";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

pub fn catalog_page(catalog: &TripCatalog) -> String {
    let mut body = String::from("<main class=\"catalog\">\n<h1>Our trips</h1>\n");
    for trip in catalog.trips() {
        let _ = write!(
            body,
            r#"<article class="trip-card">
<img src="{image}" alt="{title}">
<h2>{title}</h2>
<p>{description}</p>
<p class="price">{price}</p>
<a class="button" href="/book/{id}">Book now</a>
</article>
"#,
            image = escape(&trip.image),
            title = escape(&trip.title),
            description = escape(&trip.description),
            price = escape(&trip.price),
            id = escape(&trip.id),
        );
    }
    body.push_str("</main>");
    layout("Trips", &body)
}

pub fn booking_page(view: &BookingView<'_>) -> String {
    match view {
        BookingView::NotFound { .. } => not_found_page(),
        BookingView::Form { trip, draft, outcome, submit_disabled } => {
            form_page(trip, draft, outcome, *submit_disabled)
        }
    }
}

fn not_found_page() -> String {
    layout(
        "Trip not found",
        r#"<main class="not-found">
<h2>Trip not found</h2>
<p>The trip you are trying to book does not exist.</p>
<a class="button" href="/">Go Home</a>
</main>"#,
    )
}

fn trip_preview(trip: &Trip) -> String {
    let brochure = trip
        .brochure
        .as_deref()
        .map(|href| {
            format!(
                r#"<a href="{}" target="_blank" rel="noreferrer">View brochure</a>"#,
                escape(href)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<section class="trip-preview">
<img src="{image}" alt="{title}">
<h2>{title}</h2>
<p>{description}</p>
<p class="price">Price: <span>{price}</span></p>
{brochure}
</section>"#,
        image = escape(&trip.image),
        title = escape(&trip.title),
        description = escape(&trip.description),
        price = escape(&trip.price),
        brochure = brochure,
    )
}

fn input(label: &str, field: BookingField, kind: &str, placeholder: &str, draft: &BookingDraft) -> String {
    let extra = if field == BookingField::Persons { r#" min="1""# } else { "" };
    format!(
        r#"<label>{label}
<input type="{kind}" name="{name}" placeholder="{placeholder}" value="{value}"{extra}>
</label>"#,
        label = escape(label),
        kind = kind,
        name = field.input_name(),
        placeholder = escape(placeholder),
        value = escape(draft.get(field)),
        extra = extra,
    )
}

fn form_page(trip: &Trip, draft: &BookingDraft, outcome: &SubmissionOutcome, submit_disabled: bool) -> String {
    let mut fields = String::new();
    for (label, field, kind, placeholder) in [
        ("Full Name *", BookingField::FullName, "text", "Enter your full name"),
        ("Email *", BookingField::Email, "email", "Enter your email"),
        ("Phone *", BookingField::Phone, "text", "Enter your phone number"),
        ("Travel Date *", BookingField::TravelDate, "date", ""),
        ("Persons *", BookingField::Persons, "number", ""),
    ] {
        fields.push_str(&input(label, field, kind, placeholder, draft));
        fields.push('\n');
    }
    let _ = write!(
        fields,
        r#"<label>Message (optional)
<textarea name="{name}" rows="4" placeholder="Any special requests?">{value}</textarea>
</label>"#,
        name = BookingField::Message.input_name(),
        value = escape(&draft.message),
    );

    let (button_label, disabled) = if submit_disabled {
        ("Booking...", " disabled")
    } else {
        ("Confirm booking", "")
    };

    let status = match outcome {
        SubmissionOutcome::Success(msg) => format!(r#"<p class="success">{}</p>"#, escape(msg)),
        SubmissionOutcome::Failure(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        SubmissionOutcome::Idle | SubmissionOutcome::Loading => String::new(),
    };

    let body = format!(
        r##"<header class="hero">
<h1>Book your trip to {title}</h1>
<p>Fill in your details and confirm your booking. We'll reach out shortly with next steps.</p>
<a class="button" href="/">Back</a>
<a class="button" href="#booking-form">Continue booking</a>
</header>
<main id="booking-form">
{preview}
<section class="booking-details">
<h3>Booking details</h3>
<p>Fields marked with * are required.</p>
<form method="post" action="/book/{id}" onsubmit="{guard}">
{fields}
<button type="submit"{disabled}>{button_label}</button>
{status}
</form>
</section>
</main>"##,
        title = escape(&trip.title),
        preview = trip_preview(trip),
        id = escape(&trip.id),
        guard = escape(SUBMIT_GUARD),
        fields = fields,
        disabled = disabled,
        button_label = button_label,
        status = status,
    );

    layout(&format!("Book {}", trip.title), &body)
}
