use crate::emails::{self, OrgHeader, PriceSummaryBlock, Stop};
use crate::helper_model::{MailerError, QuoteEmailRequest, RenderedEmail};
use crate::methods::pricing_table::build_pricing_table;
use crate::methods::{formatters, timestamps};
use askama::Template;

#[derive(Template)]
#[template(path = "quote.html")]
struct QuoteHtml<'a> {
    header: String,
    first_name: &'a str,
    rv_name: String,
    rv_image_url: String,
    headline_from: String,
    headline_to: String,
    cta_url: &'a str,
    cta_label: String,
    departure: Stop,
    arrival: Stop,
    price_summary: String,
    notes: Vec<String>,
}

pub fn render(req: &QuoteEmailRequest) -> Result<RenderedEmail, MailerError> {
    let settings = req
        .organization_settings
        .as_ref()
        .ok_or(MailerError::MissingOrganizationSettings)?;
    let tz = emails::timezone_of(Some(settings))?;

    let table = build_pricing_table(&req.price_summary);
    let reservation_id = req
        .reservation_id
        .as_deref()
        .or(req.price_summary.reservation_id.as_deref());
    emails::report_warnings("quote", reservation_id, &table.warnings);

    let rv_name = emails::rv_name(req.rv_details.as_ref());
    let headline_from = emails::format_date(&req.dates.check_in, tz, timestamps::HEADLINE_DAY)?;
    let headline_to = emails::format_date(&req.dates.check_out, tz, timestamps::HEADLINE_DAY)?;
    let departure = emails::format_date(&req.dates.check_in, tz, timestamps::DATE_TIME)?;
    let arrival = emails::format_date(&req.dates.check_out, tz, timestamps::DATE_TIME)?;
    let cta_label = format!(
        "Reserve Now for {}",
        formatters::format_currency(req.price_summary.reservation_deposit.unwrap_or_default())
    );

    let html = QuoteHtml {
        header: OrgHeader::new(&req.organization).render()?,
        first_name: &req.customer_first_name,
        rv_name: rv_name.clone(),
        rv_image_url: emails::rv_image_url(req.rv_details.as_ref()),
        headline_from: headline_from.clone(),
        headline_to: headline_to.clone(),
        cta_url: &req.checkout_url,
        cta_label: cta_label.clone(),
        departure: Stop::new("Departure", departure.clone()),
        arrival: Stop::new("Return", arrival.clone()),
        price_summary: PriceSummaryBlock::new(&table).render()?,
        notes: emails::text_lines(&req.email_text),
    }
    .render()?;

    let mut sections = vec![
        format!(
            "Hi {}, here is your quote for the {} from {} to {}.",
            req.customer_first_name, rv_name, headline_from, headline_to
        ),
        format!("Departure: {}\nReturn: {}", departure, arrival),
        emails::price_summary_text(&table),
    ];
    if !req.email_text.trim().is_empty() {
        sections.push(req.email_text.trim().to_string());
    }
    sections.push(format!("{}: {}", cta_label, req.checkout_url));

    Ok(RenderedEmail {
        subject: format!("Your quote for the {} from {}", rv_name, req.organization.name),
        html,
        text: sections.join("\n\n"),
        warnings: table.warnings,
    })
}
