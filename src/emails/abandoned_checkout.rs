use crate::emails::{self, OrgHeader, PriceSummaryBlock, Stop};
use crate::helper_model::{AbandonedCheckoutRequest, MailerError, RenderedEmail};
use crate::methods::pricing_table::build_pricing_table;
use crate::methods::{formatters, timestamps};
use askama::Template;

const NOT_SELECTED: &str = "Not selected";
const LAST_CHANCE: &str = "Last Chance: Complete Your RV Rental";
const STILL_OPEN: &str = "We noticed you still haven't completed your RV booking. Your selected dates are in demand, and we can't guarantee availability much longer.";

#[derive(Template)]
#[template(path = "abandoned_checkout.html")]
struct AbandonedCheckoutHtml<'a> {
    header: String,
    title: &'a str,
    intro: &'a str,
    rv_name: String,
    rv_image_url: String,
    departure: Stop,
    arrival: Stop,
    price_summary: Option<String>,
    second_reminder: bool,
    cta_url: &'a str,
    cta_label: String,
    organization_name: &'a str,
}

pub fn render(req: &AbandonedCheckoutRequest) -> Result<RenderedEmail, MailerError> {
    let tz = emails::timezone_of(req.organization_settings.as_ref())?;

    let table = req.price_summary.as_ref().map(build_pricing_table);
    if let (Some(summary), Some(table)) = (&req.price_summary, &table) {
        emails::report_warnings("abandoned_checkout", summary.reservation_id.as_deref(), &table.warnings);
    }

    let subject = if req.is_second_reminder {
        String::from(LAST_CHANCE)
    } else {
        format!("Your Reservation with {}", req.organization.name)
    };
    let intro = if req.is_second_reminder {
        String::from(STILL_OPEN)
    } else {
        format!(
            "Hi {}, you're almost there! Click the Reserve Now button to complete your reservation, or feel free to call us at the phone number above if you have any questions.",
            req.customer_first_name
        )
    };
    let mut cta_label = String::from(if req.is_second_reminder {
        "Complete Your Booking Now"
    } else {
        "Reserve Now"
    });
    if let Some(summary) = &req.price_summary {
        cta_label = format!(
            "{} for {}",
            cta_label,
            formatters::format_currency(summary.reservation_deposit.unwrap_or_default())
        );
    }

    let check_in = emails::format_optional_date(req.check_in_date.as_deref(), tz, timestamps::DATE_TIME, NOT_SELECTED)?;
    let check_out = emails::format_optional_date(req.check_out_date.as_deref(), tz, timestamps::DATE_TIME, NOT_SELECTED)?;
    let rv_name = req
        .rv_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| emails::rv_name(req.rv_details.as_ref()));

    let mut sections = vec![
        intro.clone(),
        format!("Departure: {}\nReturn: {}", check_in, check_out),
    ];
    if let Some(table) = &table {
        sections.push(emails::price_summary_text(table));
    }
    sections.push(format!("{}: {}", cta_label, req.resume_url));
    sections.push(format!("Best regards,\nThe {} Team", req.organization.name));

    let html = AbandonedCheckoutHtml {
        header: OrgHeader::new(&req.organization).render()?,
        title: &subject,
        intro: &intro,
        rv_name,
        rv_image_url: emails::rv_image_url(req.rv_details.as_ref()),
        departure: Stop::new("Departure", check_in),
        arrival: Stop::new("Return", check_out),
        price_summary: table
            .as_ref()
            .map(|t| PriceSummaryBlock::new(t).render())
            .transpose()?,
        second_reminder: req.is_second_reminder,
        cta_url: &req.resume_url,
        cta_label,
        organization_name: &req.organization.name,
    }
    .render()?;

    Ok(RenderedEmail {
        subject,
        html,
        text: sections.join("\n\n"),
        warnings: table.map(|t| t.warnings).unwrap_or_default(),
    })
}
