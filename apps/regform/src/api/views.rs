//! # HTML Views
//!
//! Server-rendered pages for the registration flow. All user-supplied text
//! passes through [`escape_html`] before it reaches the page.

use regform_core::primitives::MAX_FIELD_LENGTH;
use regform_core::{Field, FieldErrors, RegistrationForm};

/// Countries offered in the form's select box.
pub const COUNTRIES: &[&str] = &[
    "Australia",
    "Brazil",
    "Canada",
    "China",
    "France",
    "Germany",
    "India",
    "Japan",
    "Mexico",
    "Nepal",
    "Singapore",
    "South Africa",
    "Sri Lanka",
    "United Kingdom",
    "United States",
];

const STYLE: &str = "body{font-family:sans-serif;max-width:32rem;margin:2rem auto}\
label{display:block;margin-top:1rem}\
input,select{width:100%;padding:.4rem}\
.error-msg{color:#b00020;font-size:.9rem}\
.actions{margin-top:1.5rem}";

const CLEAR_SCRIPT: &str = "function clearForm(){\
['name','state','country'].forEach(function(id){document.getElementById(id).value='';});\
document.querySelectorAll('.error-msg').forEach(function(e){e.remove();});}";

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        title, STYLE, body
    )
}

fn error_block(errors: &FieldErrors, field: Field) -> String {
    errors
        .for_field(field)
        .map(|msg| {
            format!(
                "<span class=\"error-msg\" id=\"{}-error\">{}</span>\n",
                field.as_str(),
                escape_html(msg)
            )
        })
        .collect()
}

fn text_input(form: &RegistrationForm, errors: &FieldErrors, field: Field) -> String {
    format!(
        "<label for=\"{id}\">{label}</label>\n\
         <input type=\"text\" id=\"{id}\" name=\"{id}\" value=\"{value}\" maxlength=\"{max}\">\n{errors}",
        id = field.as_str(),
        label = field.label(),
        value = escape_html(form.get(field)),
        max = MAX_FIELD_LENGTH,
        errors = error_block(errors, field),
    )
}

fn country_select(form: &RegistrationForm, errors: &FieldErrors) -> String {
    let selected = form.country.as_str();
    let mut options = String::from("<option value=\"\">-- Select Country --</option>\n");

    // Keep an unlisted submitted value so the user sees what they sent.
    if !selected.is_empty() && !COUNTRIES.contains(&selected) {
        let value = escape_html(selected);
        options.push_str(&format!(
            "<option value=\"{0}\" selected>{0}</option>\n",
            value
        ));
    }
    for country in COUNTRIES {
        let marker = if *country == selected { " selected" } else { "" };
        options.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            country, marker
        ));
    }

    format!(
        "<label for=\"country\">{}</label>\n<select id=\"country\" name=\"country\">\n{}</select>\n{}",
        Field::Country.label(),
        options,
        error_block(errors, Field::Country)
    )
}

/// The registration form, pre-filled with `form` and annotated with `errors`.
#[must_use]
pub fn render_form(form: &RegistrationForm, errors: &FieldErrors) -> String {
    let body = format!(
        "<h1 id=\"formHeading\">Registration Form</h1>\n\
         <form id=\"registrationForm\" method=\"post\" action=\"/register\">\n\
         {name}{state}{country}\
         <div class=\"actions\">\n\
         <button type=\"submit\" id=\"submitBtn\">Submit</button>\n\
         <button type=\"button\" id=\"clearBtn\" onclick=\"clearForm()\">Clear</button>\n\
         </div>\n</form>\n<script>{script}</script>",
        name = text_input(form, errors, Field::Name),
        state = text_input(form, errors, Field::State),
        country = country_select(form, errors),
        script = CLEAR_SCRIPT,
    );
    page("Registration Form", &body)
}

/// The success page, echoing the registered values when known.
#[must_use]
pub fn render_success(registered: Option<&RegistrationForm>) -> String {
    let details = registered
        .map(|form| {
            let rows: String = Field::ALL
                .iter()
                .map(|field| {
                    format!(
                        "<dt>{}</dt><dd id=\"registered-{}\">{}</dd>\n",
                        field.label(),
                        field.as_str(),
                        escape_html(form.get(*field))
                    )
                })
                .collect();
            format!("<dl id=\"registrationDetails\">\n{}</dl>\n", rows)
        })
        .unwrap_or_default();

    let body = format!(
        "<h1 id=\"successHeading\">Registration Successful</h1>\n{}\
         <a id=\"backBtn\" href=\"/\">Back to Register</a>",
        details
    );
    page("Registration Success", &body)
}

/// Generic page shown when the store fails.
#[must_use]
pub fn render_failure() -> String {
    page(
        "Registration Error",
        "<h1 id=\"errorHeading\">Something went wrong</h1>\n\
         <p>Your registration could not be saved. Please try again later.</p>\n\
         <a id=\"backBtn\" href=\"/\">Back to Register</a>",
    )
}

// =============================================================================
// TESTS
// =============================================================================
