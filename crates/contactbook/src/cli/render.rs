//! Text rendering of contact listings.
//!
//! Rows carry the 1-based position of the contact in the whole book, so a
//! filtered listing still shows the number `edit` and `delete` expect.

use std::fmt::Write as _;

use crate::contact::Contact;
use crate::error::Result;

/// A contact together with its 1-based row in the book.
pub type Row<'a> = (usize, &'a Contact);

/// Number of email columns needed to show every address of every row.
///
/// Always at least one, so the header shape does not depend on the data.
#[must_use]
pub fn email_columns(rows: &[Row<'_>]) -> usize {
    rows.iter()
        .map(|(_, c)| c.emails().len())
        .max()
        .unwrap_or(0)
        .max(1)
}

fn mobile_label(contact: &Contact) -> &'static str {
    if contact.is_mobile() {
        "yes"
    } else {
        "no"
    }
}

/// Render an aligned table with one column per email slot.
#[must_use]
pub fn render_table(rows: &[Row<'_>]) -> String {
    let email_count = email_columns(rows);

    let mut header = vec![
        "#".to_string(),
        "Name".to_string(),
        "Postal Code".to_string(),
        "Phone Number".to_string(),
    ];
    if email_count == 1 {
        header.push("Email".to_string());
    } else {
        header.extend((1..=email_count).map(|n| format!("Email {n}")));
    }
    header.push("Mobile".to_string());

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(row, contact)| {
            let mut cells = vec![
                row.to_string(),
                contact.name().to_string(),
                contact.locality_code().to_string(),
                contact.formatted_phone(),
            ];
            cells.extend(
                (0..email_count).map(|i| contact.email_at(i).unwrap_or_default().to_string()),
            );
            cells.push(mobile_label(contact).to_string());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render one line per contact.
#[must_use]
pub fn render_plain(rows: &[Row<'_>]) -> String {
    let mut out = String::new();
    for (row, contact) in rows {
        let _ = write!(
            out,
            "{row}. {} [{}] {}",
            contact.name(),
            contact.locality_code(),
            contact.formatted_phone()
        );
        if contact.is_mobile() {
            out.push_str(" (mobile)");
        }
        if !contact.emails().is_empty() {
            let _ = write!(out, " <{}>", contact.emails().join(", "));
        }
        out.push('\n');
    }
    out
}

/// Render the contacts as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
pub fn render_json(rows: &[Row<'_>]) -> Result<String> {
    let contacts: Vec<&Contact> = rows.iter().map(|(_, c)| *c).collect();
    Ok(serde_json::to_string_pretty(&contacts)?)
}

/// Render every field of one contact, one per line.
#[must_use]
pub fn render_detail(row: usize, contact: &Contact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Row:          {row}");
    let _ = writeln!(out, "Name:         {}", contact.name());
    let _ = writeln!(out, "Postal Code:  {}", contact.locality_code());
    let _ = writeln!(out, "Phone Number: {}", contact.formatted_phone());
    let _ = writeln!(out, "Mobile:       {}", mobile_label(contact));
    if contact.emails().is_empty() {
        let _ = writeln!(out, "Emails:       (none)");
    } else {
        for (i, email) in contact.emails().iter().enumerate() {
            let label = if i == 0 { "Emails:" } else { "" };
            let _ = writeln!(out, "{label:<14}{email}");
        }
    }
    out
}
