//! Server-rendered HTML pages.
//!
//! The portal is plain HTML forms; pages are assembled as strings with user
//! content escaped. Flash notices render at the top of every page.

use html_escape::encode_text;

use crate::models::{ExtractedFile, Flash, PayPeriod, SessionUser};

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut notices = String::new();
    for flash in flashes {
        notices.push_str(&format!(
            "<p class=\"flash flash-{}\">{}</p>\n",
            encode_text(&flash.level),
            encode_text(&flash.message)
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Payslip Portal</title></head>\n\
         <body>\n<h1>Payslip Portal</h1>\n{notices}{body}\n</body>\n</html>\n",
        title = encode_text(title),
    )
}

pub fn login(flashes: &[Flash]) -> String {
    layout(
        "Login",
        flashes,
        "<h2>Login</h2>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username or email <input name=\"username\" required></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p><a href=\"/register\">Register</a> | <a href=\"/forgot-password\">Forgot password?</a></p>",
    )
}

pub fn register(flashes: &[Flash]) -> String {
    layout(
        "Register",
        flashes,
        "<h2>Register</h2>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Username <input name=\"username\" required></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label><br>\n\
         <label>Employee number <input name=\"employee_number\" required></label><br>\n\
         <label>Email <input type=\"email\" name=\"email\" required></label><br>\n\
         <label>Department <input name=\"department\"></label><br>\n\
         <label><input type=\"checkbox\" name=\"terms\" value=\"agreed\"> I agree to the <a href=\"/terms\">terms and conditions</a></label><br>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Back to login</a></p>",
    )
}

pub fn portal(
    flashes: &[Flash],
    user: &SessionUser,
    periods: &[PayPeriod],
    history: &[ExtractedFile],
) -> String {
    let department = user.department.as_deref().unwrap_or("-");
    let mut body = format!(
        "<h2>Welcome, {}</h2>\n\
         <p>Employee number: {} | Department: {}</p>\n\
         <p><a href=\"/change-password\">Change password</a> | <a href=\"/contact-hr\">Contact HR</a> | <a href=\"/logout\">Logout</a></p>\n\
         <h3>Pay periods</h3>\n\
         <form method=\"post\" action=\"/portal\">\n<select name=\"pay_date\">\n",
        encode_text(&user.username),
        encode_text(&user.employee_number),
        encode_text(department),
    );
    for period in periods {
        let status = if period.available { "" } else { " (not available)" };
        body.push_str(&format!(
            "<option value=\"{label}\">{label}{status}</option>\n",
            label = encode_text(&period.label),
        ));
    }
    body.push_str(
        "</select>\n<button type=\"submit\">Download payslip</button>\n</form>\n\
         <h3>Extraction history</h3>\n",
    );
    if history.is_empty() {
        body.push_str("<p>No payslips extracted yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for file in history {
            body.push_str(&format!(
                "<li>{date} — <a href=\"/download/{file}\">download</a>\n\
                 <form method=\"post\" action=\"/delete_payslip/{file}\" style=\"display:inline\">\n\
                 <button type=\"submit\">Remove from history</button></form></li>\n",
                date = encode_text(&file.pay_date),
                file = encode_text(&file.filename),
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Portal", flashes, &body)
}

pub fn change_password(flashes: &[Flash]) -> String {
    layout(
        "Change Password",
        flashes,
        "<h2>Change password</h2>\n\
         <form method=\"post\" action=\"/change-password\">\n\
         <label>Current password <input type=\"password\" name=\"current_password\" required></label><br>\n\
         <label>New password <input type=\"password\" name=\"new_password\" required></label><br>\n\
         <label>Confirm new password <input type=\"password\" name=\"confirm_password\" required></label><br>\n\
         <button type=\"submit\">Update</button>\n\
         </form>\n\
         <p><a href=\"/portal\">Back to portal</a></p>",
    )
}

pub fn forgot_password(flashes: &[Flash]) -> String {
    layout(
        "Forgot Password",
        flashes,
        "<h2>Forgot password</h2>\n\
         <form method=\"post\" action=\"/forgot-password\">\n\
         <label>Email <input type=\"email\" name=\"email\" required></label><br>\n\
         <button type=\"submit\">Send reset link</button>\n\
         </form>\n\
         <p><a href=\"/login\">Back to login</a></p>",
    )
}

pub fn terms(flashes: &[Flash]) -> String {
    layout(
        "Terms",
        flashes,
        "<h2>Terms and conditions</h2>\n\
         <p>Payslips are confidential. Accounts are personal and must not be shared.\n\
         Extracted documents are retained on the server for later download.</p>\n\
         <p><a href=\"/register\">Back to registration</a></p>",
    )
}

pub fn contact_hr(flashes: &[Flash]) -> String {
    layout(
        "Contact HR",
        flashes,
        "<h2>Contact HR</h2>\n\
         <p>For payroll queries email <a href=\"mailto:hr@example.com\">hr@example.com</a>\n\
         or call extension 4100 during business hours.</p>\n\
         <p><a href=\"/portal\">Back to portal</a></p>",
    )
}
