pub mod sendgrid_mailer;
