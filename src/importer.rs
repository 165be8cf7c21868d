use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::description;
use crate::error::{GaapError, Result};
use crate::models::Transaction;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Column recognition
// ---------------------------------------------------------------------------

/// Accepted header labels per column; the bank's own label comes first.
const AMOUNT_HEADERS: &[&str] = &["Valor", "Amount"];
const DATE_HEADERS: &[&str] = &["Data", "Date"];
const DESCRIPTION_HEADERS: &[&str] = &["Descrição", "Description"];

fn clean_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str], canonical: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&clean_header(h)))
        .ok_or_else(|| GaapError::MissingColumn(canonical.to_string()))
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    amount: usize,
    date: usize,
    description: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let columns = Self {
            amount: find_column(headers, AMOUNT_HEADERS, "Amount")?,
            date: find_column(headers, DATE_HEADERS, "Date")?,
            description: find_column(headers, DESCRIPTION_HEADERS, "Descrição")?,
        };
        log::debug!("resolved columns: {columns:?}");
        Ok(columns)
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

pub fn parse_amount(raw: &str, decimal_comma: bool) -> Option<Decimal> {
    let mut s = raw.trim().trim_matches('"').trim().to_string();
    let parenthesized = s.starts_with('(') && s.ends_with(')') && s.len() >= 2;
    if parenthesized {
        s = s[1..s.len() - 1].to_string();
    }
    s = s.replace("R$", "").replace('$', "");
    s.retain(|c| !c.is_whitespace());
    if decimal_comma {
        s = s.replace('.', "").replace(',', ".");
    } else {
        s = s.replace(',', "");
    }
    let value = Decimal::from_str(&s).ok()?;
    Some(if parenthesized { -value } else { value })
}

pub fn parse_date(raw: &str, day_first: bool) -> Option<NaiveDate> {
    let raw = raw.split_whitespace().next()?;
    let ordered: &[&str] = if day_first {
        &["%d/%m/%Y", "%d-%m-%Y"]
    } else {
        &["%m/%d/%Y", "%m-%d-%Y"]
    };
    std::iter::once("%Y-%m-%d")
        .chain(ordered.iter().copied())
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub struct Statement {
    pub headers: Vec<String>,
    pub records: Vec<Transaction>,
    pub skipped: usize,
}

pub fn load_statement(file_path: &Path, settings: &Settings) -> Result<Statement> {
    let file = std::fs::File::open(file_path)?;
    let statement = read_statement(std::io::BufReader::new(file), settings)?;
    log::info!(
        "loaded {} records from {} ({} skipped)",
        statement.records.len(),
        file_path.display(),
        statement.skipped
    );
    Ok(statement)
}

pub fn read_statement<R: Read>(reader: R, settings: &Settings) -> Result<Statement> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let header_record = rdr.headers()?.clone();
    let headers: Vec<String> = header_record
        .iter()
        .map(|h| clean_header(h).to_string())
        .collect();
    let columns = Columns::resolve(&header_record)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("skipping unreadable row: {e}");
                skipped += 1;
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        let raw_amount = record.get(columns.amount).unwrap_or("");
        let Some(amount) = parse_amount(raw_amount, settings.decimal_comma) else {
            log::warn!("line {line}: skipping row with amount {raw_amount:?}");
            skipped += 1;
            continue;
        };
        let raw_date = record.get(columns.date).unwrap_or("");
        let Some(date) = parse_date(raw_date, settings.day_first) else {
            log::warn!("line {line}: skipping row with date {raw_date:?}");
            skipped += 1;
            continue;
        };
        let parts = description::parse(record.get(columns.description).unwrap_or(""));

        records.push(Transaction {
            amount,
            date,
            parts,
        });
    }

    Ok(Statement {
        headers,
        records,
        skipped,
    })
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header names plus the first `limit` raw rows, without column checks.
pub fn preview(file_path: &Path, limit: usize) -> Result<Preview> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let headers = rdr.headers()?.iter().map(|h| clean_header(h).to_string()).collect();
    let mut rows = Vec::new();
    for result in rdr.records().take(limit) {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Preview { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn read(content: &str) -> Result<Statement> {
        read_statement(content.as_bytes(), &Settings::default())
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56", false), Some(dec("1234.56")));
        assert_eq!(parse_amount("\"500.00\"", false), Some(dec("500.00")));
        assert_eq!(parse_amount("  -42.50  ", false), Some(dec("-42.50")));
        assert_eq!(parse_amount("0", false), Some(Decimal::ZERO));
        assert_eq!(parse_amount("not_a_number", false), None);
        assert_eq!(parse_amount("", false), None);
    }

    #[test]
    fn test_parse_amount_parenthesized_and_currency() {
        assert_eq!(parse_amount("(500.00)", false), Some(dec("-500.00")));
        assert_eq!(parse_amount("$1,234.56", false), Some(dec("1234.56")));
        assert_eq!(parse_amount("R$ -50.00", false), Some(dec("-50.00")));
    }

    #[test]
    fn test_parse_amount_decimal_comma() {
        assert_eq!(parse_amount("1.234,56", true), Some(dec("1234.56")));
        assert_eq!(parse_amount("-12,5", true), Some(dec("-12.5")));
    }

    #[test]
    fn test_parse_date_day_first() {
        let d = parse_date("03/02/2024", true).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(parse_date("31/01/2024", true), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(parse_date("01/31/2024", true), None);
    }

    #[test]
    fn test_parse_date_month_first_and_iso() {
        assert_eq!(parse_date("01/31/2024", false), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(parse_date("2024-05-06", true), NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(parse_date("2024-05-06 10:00:00", false), NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(parse_date("06-05-2024", true), NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(parse_date("invalid", true), None);
        assert_eq!(parse_date("", true), None);
    }

    #[test]
    fn test_read_statement_nubank_layout() {
        let content = "\
Data,Valor,Identificador,Descrição
02/01/2024,1500.00,abc-1,Transferência recebida pelo Pix - ACME LTDA - 12.345.678/0001-90 - BANCO DO BRASIL
05/01/2024,-89.90,abc-2,Compra no débito
15/02/2024,-200.00,abc-3,Transferência enviada pelo Pix - JOAO - •••.111.222-•• - ITAU
";
        let statement = read(content).unwrap();
        assert_eq!(statement.records.len(), 3);
        assert_eq!(statement.skipped, 0);
        assert_eq!(statement.headers, vec!["Data", "Valor", "Identificador", "Descrição"]);

        let first = &statement.records[0];
        assert_eq!(first.amount, dec("1500.00"));
        assert_eq!(first.remittant(), Some("ACME LTDA"));
        assert_eq!(first.bank(), Some("BANCO DO BRASIL"));
        assert_eq!(first.month(), 1);

        // Malformed descriptions keep the row.
        assert!(statement.records[1].parts.is_none());
        assert_eq!(statement.records[1].amount, dec("-89.90"));
    }

    #[test]
    fn test_read_statement_english_headers_and_bom() {
        let content = "\u{feff}Date,Amount,Description\n2024-03-01,10,PIX - Ana - 1 - Nubank\n";
        let statement = read(content).unwrap();
        assert_eq!(statement.records.len(), 1);
        assert_eq!(statement.headers[0], "Date");
    }

    #[test]
    fn test_read_statement_missing_amount_column() {
        let content = "Data,Identificador,Descrição\n02/01/2024,x,PIX - A - B - C\n";
        match read(content) {
            Err(GaapError::MissingColumn(name)) => assert_eq!(name, "Amount"),
            other => panic!("expected missing column, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_read_statement_missing_date_column() {
        let content = "Valor,Descrição\n10,PIX - A - B - C\n";
        match read(content) {
            Err(GaapError::MissingColumn(name)) => assert_eq!(name, "Date"),
            other => panic!("expected missing column, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_read_statement_skips_unparseable_rows() {
        let content = "\
Data,Valor,Descrição
02/01/2024,abc,PIX - A - B - C
99/99/2024,10,PIX - A - B - C
03/01/2024,10,PIX - A - B - C
";
        let statement = read(content).unwrap();
        assert_eq!(statement.records.len(), 1);
        assert_eq!(statement.skipped, 2);
    }

    #[test]
    fn test_load_statement_and_preview_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extrato.csv");
        let mut content = String::from("Data,Valor,Identificador,Descrição\n");
        for day in 1..=8 {
            content.push_str(&format!("{day:02}/03/2024,-{day}.00,id{day},PIX - Loja - x - Banco\n"));
        }
        std::fs::write(&path, &content).unwrap();

        let statement = load_statement(&path, &Settings::default()).unwrap();
        assert_eq!(statement.records.len(), 8);

        let head = preview(&path, 5).unwrap();
        assert_eq!(head.headers.len(), 4);
        assert_eq!(head.rows.len(), 5);
        assert_eq!(head.rows[0][1], "-1.00");
    }
}
