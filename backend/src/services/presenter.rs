//! Dashboard page rendering
//!
//! Turns a [`Report`] into a single self-contained HTML page: the report
//! table with at-risk rows highlighted, the two summary lines, the highlight
//! legend and the glossary.

use std::fmt::{self, Write};

use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use shared::{format_fixed, Language, Report, ReportColumn, ReportRow};

use crate::services::LastUpdated;

const PAGE_TITLE: &str = "Chytra Zed - warehouse report";
const PAGE_ICON: &str = "👊";
const HIGHLIGHT_COLOR: &str = "lightcoral";

/// Number display settings passed explicitly to the renderer
#[derive(Debug, Clone, Copy)]
pub struct NumberFormat {
    pub decimal_places: u32,
    /// Locale used for thousands grouping
    pub locale: Locale,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_places: 1,
            locale: Locale::en,
        }
    }
}

impl NumberFormat {
    pub fn with_decimal_places(decimal_places: u32) -> Self {
        Self {
            decimal_places,
            ..Self::default()
        }
    }

    /// Format with thousands separators, e.g. `1234567.84` -> `"1,234,567.8"`
    pub fn grouped(&self, value: Decimal) -> String {
        let fixed = format_fixed(value.abs(), self.decimal_places);
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let grouped = whole
            .parse::<u128>()
            .map(|n| n.to_formatted_string(&self.locale))
            .unwrap_or_else(|_| whole.to_string());

        let negative = value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

/// Everything the dashboard page shows
pub struct DashboardView<'a> {
    pub report: &'a Report,
    pub last_updated: &'a LastUpdated,
    pub threshold_days: i64,
    pub language: Language,
    pub format: NumberFormat,
}

struct Texts {
    header: &'static str,
    total_value: &'static str,
    vat_suffix: &'static str,
    last_update: &'static str,
    legend: &'static str,
    glossary_title: &'static str,
    glossary: &'static [(&'static str, &'static str)],
}

const CZECH: Texts = Texts {
    header: "Chytra zed - report skladu",
    total_value: "Aktualni hodnota skladu je",
    vat_suffix: "CZK bez DPH",
    last_update: "Posledni aktualizace dat probehla",
    legend: "Cervenou barvou zvyraznujeme produkty, kde zasoba vydrzi menej nez dni",
    glossary_title: "Vysvětlivky",
    glossary: &[
        ("Nákupní cena bez DPH", "NC jednoho kusu produktu."),
        (
            "Hodnota skladu v CZK",
            "počet ks * NC jednoho kus = hodnota v CZK bez DPH, která leží skladem.",
        ),
        (
            "Prodeje/měsíc (průměr)",
            "průměrný počet ks, který se prodá za měsíc. Je to hodnota \"Prodeje od 1.9.2023\" přepočítaná aritmeticky na měsíce.",
        ),
        (
            "Prodeje od 1.9.2023",
            "celkový počet ks, který se prodal od 1.9.2023 do data aktualizace.",
        ),
        (
            "Posl.příjem",
            "datum, kdy naposledy byl daný produkt naskladněný do Shipmallu.",
        ),
        (
            "Kolik dni vydrží sklad?",
            "počet ks na skladě / prodeje za měsíc... přepočtené na dny. Na jak dlouho máme cca zásobu.",
        ),
    ],
};

const ENGLISH: Texts = Texts {
    header: "Chytra zed - warehouse report",
    total_value: "Current stock value is",
    vat_suffix: "CZK excl. VAT",
    last_update: "Data last updated",
    legend: "Highlighted in red: products whose stock lasts fewer days than",
    glossary_title: "Glossary",
    glossary: &[
        ("Purchase price excl. VAT", "purchase price of one piece."),
        (
            "Stock value in CZK",
            "pieces in stock * purchase price of one piece = value in CZK excl. VAT sitting in the warehouse.",
        ),
        (
            "Sales/month (avg)",
            "average number of pieces sold per month. It is \"Sales since 1.9.2023\" converted arithmetically to months.",
        ),
        (
            "Sales since 1.9.2023",
            "total number of pieces sold between 1.9.2023 and the data update.",
        ),
        (
            "Last receipt",
            "date the product was last received into the Shipmall warehouse.",
        ),
        (
            "Days of stock left",
            "pieces in stock / monthly sales, converted to days. Roughly how long the stock lasts.",
        ),
    ],
};

fn texts(language: Language) -> &'static Texts {
    match language {
        Language::Czech => &CZECH,
        Language::English => &ENGLISH,
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Inline style of every cell in a row
pub fn row_style(row: &ReportRow, threshold_days: i64) -> &'static str {
    if row.is_at_risk(threshold_days) {
        "background-color: lightcoral"
    } else {
        ""
    }
}

/// Total stock value line, e.g. `Aktualni hodnota skladu je: 12,345.6 CZK bez DPH.`
pub fn total_value_line(report: &Report, language: Language, format: &NumberFormat) -> String {
    let t = texts(language);
    format!(
        "{}: {} {}.",
        t.total_value,
        format.grouped(report.total_inventory_value.amount),
        t.vat_suffix
    )
}

/// Data timestamp line
pub fn last_update_line(last_updated: &LastUpdated, language: Language) -> String {
    format!("{}: {}.", texts(language).last_update, last_updated)
}

fn write_table(out: &mut String, view: &DashboardView<'_>) -> fmt::Result {
    out.push_str("<table class=\"report\">\n<thead><tr>");
    for column in ReportColumn::ALL {
        write!(out, "<th>{}</th>", escape_html(column.label(view.language)))?;
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &view.report.rows {
        let style = row_style(row, view.threshold_days);
        if style.is_empty() {
            out.push_str("<tr>");
        } else {
            out.push_str("<tr class=\"at-risk\">");
        }
        for column in ReportColumn::ALL {
            let class = if column.is_numeric() { " class=\"num\"" } else { "" };
            let cell = escape_html(&column.cell(row, view.format.decimal_places));
            if style.is_empty() {
                write!(out, "<td{}>{}</td>", class, cell)?;
            } else {
                write!(out, "<td{} style=\"{}\">{}</td>", class, style, cell)?;
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    Ok(())
}

fn write_head(out: &mut String, view: &DashboardView<'_>) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{title}</title>\n\
<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>\">\n\
<style>\n\
body {{ font-family: sans-serif; margin: 1.5rem; }}\n\
main {{ width: 100%; max-width: none; }}\n\
table.report {{ border-collapse: collapse; font-size: 0.9rem; }}\n\
table.report th, table.report td {{ border: 1px solid #ddd; padding: 0.25rem 0.5rem; }}\n\
table.report th {{ background: #f3f3f3; text-align: left; }}\n\
td.num {{ text-align: right; }}\n\
.legend {{ background-color: {color}; color: white; padding: 10px; border-radius: 5px; display: inline-block; }}\n\
.info {{ background: #e8f1fb; padding: 1rem; border-radius: 5px; margin-top: 1.5rem; }}\n\
</style>\n</head>\n",
        lang = view.language.code(),
        title = PAGE_TITLE,
        icon = PAGE_ICON,
        color = HIGHLIGHT_COLOR,
    )
}

fn write_summary(out: &mut String, view: &DashboardView<'_>) -> fmt::Result {
    let t = texts(view.language);

    writeln!(
        out,
        "<p>{}</p>",
        escape_html(&total_value_line(view.report, view.language, &view.format))
    )?;
    writeln!(
        out,
        "<p>{}</p>",
        escape_html(&last_update_line(view.last_updated, view.language))
    )?;
    writeln!(
        out,
        "<p><span class=\"legend\">{}: {}</span></p>",
        escape_html(t.legend),
        view.threshold_days
    )?;

    writeln!(out, "<div class=\"info\">\n<strong>{}</strong>:\n<ul>", escape_html(t.glossary_title))?;
    for (term, explanation) in t.glossary {
        writeln!(
            out,
            "<li><strong>{}</strong>: {}</li>",
            escape_html(term),
            escape_html(explanation)
        )?;
    }
    out.push_str("</ul>\n</div>\n");
    Ok(())
}

/// Render the full dashboard page
pub fn render_dashboard(view: &DashboardView<'_>) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(4096 + view.report.rows.len() * 512);

    write_head(&mut out, view)?;
    writeln!(out, "<body>\n<main>\n<h1>{}</h1>", escape_html(texts(view.language).header))?;
    write_table(&mut out, view)?;
    write_summary(&mut out, view)?;
    out.push_str("</main>\n</body>\n</html>\n");

    Ok(out)
}
