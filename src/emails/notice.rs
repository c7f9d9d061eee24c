//! Short status notices sent when staff cancel a reservation or turn down a
//! rental request.

use crate::emails::{self, OrgHeader};
use crate::helper_model::{MailerError, NoticeEmailRequest, RenderedEmail};
use askama::Template;

pub const DEFAULT_CANCELLATION_MESSAGE: &str = "We regret to inform you that your reservation has been cancelled. If you have any questions or concerns, please don't hesitate to contact us.";
pub const DEFAULT_REJECTION_MESSAGE: &str = "We're sorry, we are unable to approve your rental request at this time. Please feel free to reach out for more information";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Cancellation,
    Rejection,
}

impl NoticeKind {
    fn title(self) -> &'static str {
        match self {
            NoticeKind::Cancellation => "Reservation Cancelled",
            NoticeKind::Rejection => "Reservation Request Update",
        }
    }

    fn lead(self, reservation_number: &str) -> String {
        match self {
            NoticeKind::Cancellation => format!("Your reservation #{} has been cancelled.", reservation_number),
            NoticeKind::Rejection => format!("Regarding your reservation request #{}:", reservation_number),
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            NoticeKind::Cancellation => DEFAULT_CANCELLATION_MESSAGE,
            NoticeKind::Rejection => DEFAULT_REJECTION_MESSAGE,
        }
    }
}

#[derive(Template)]
#[template(path = "notice.html")]
struct NoticeHtml<'a> {
    header: String,
    title: &'a str,
    customer_name: &'a str,
    lead: &'a str,
    message: Vec<String>,
}

pub fn render(kind: NoticeKind, req: &NoticeEmailRequest) -> Result<RenderedEmail, MailerError> {
    let message = req
        .custom_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(kind.default_message());
    let lead = kind.lead(&req.reservation_number);
    let header = match &req.organization {
        Some(organization) => OrgHeader::new(organization).render()?,
        None => String::new(),
    };

    let html = NoticeHtml {
        header,
        title: kind.title(),
        customer_name: &req.customer_name,
        lead: &lead,
        message: emails::text_lines(message),
    }
    .render()?;
    let text = format!("Dear {},\n\n{}\n\n{}", req.customer_name, lead, message);

    let subject = match kind {
        NoticeKind::Cancellation => format!("Reservation #{} Cancelled", req.reservation_number),
        NoticeKind::Rejection => format!("Reservation Request #{} Update", req.reservation_number),
    };
    Ok(RenderedEmail {
        subject,
        html,
        text,
        warnings: Vec::new(),
    })
}
