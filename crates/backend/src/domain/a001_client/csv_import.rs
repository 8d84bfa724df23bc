//! Разбор и валидация CSV-файла массового импорта клиентов
//!
//! Формат: шесть колонок `name,storeType,location,contactPerson,phone,email`,
//! первая строка — заголовок. Кавычки экранируют запятые внутри поля.

use contracts::domain::a001_client::{is_valid_email, is_valid_phone, ClientCsvRow, ValidationError};
use thiserror::Error;

/// Ошибки уровня файла; прерывают импорт до обработки строк
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("CSV file is empty")]
    EmptyFile,
    #[error("No reps available for assignment")]
    NoRepsAvailable,
}

/// Валидная запись с уже назначенным представителем
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedClientRecord {
    pub row: ClientCsvRow,
    pub rep_id: String,
}

/// Результат разбора: валидные записи и ошибки, обе в порядке строк файла
#[derive(Debug, Clone)]
pub struct ParsedImport {
    pub records: Vec<AssignedClientRecord>,
    pub errors: Vec<ValidationError>,
}

/// Разбить текст на строки-поля
///
/// Пустые (после trim) строки отбрасываются до нумерации, поэтому
/// номера строк считаются по отфильтрованной последовательности.
/// Кавычка переключает режим и не попадает в значение; запятая
/// разделяет поля только вне кавычек; каждое поле обрезается.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut row = Vec::new();
            let mut current = String::new();
            let mut in_quotes = false;

            for ch in line.chars() {
                if ch == '"' {
                    in_quotes = !in_quotes;
                } else if ch == ',' && !in_quotes {
                    row.push(current.trim().to_string());
                    current.clear();
                } else {
                    current.push(ch);
                }
            }

            row.push(current.trim().to_string());
            row
        })
        .collect()
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Проверить одну строку данных; все применимые проверки выполняются,
/// строка может накопить несколько ошибок
fn validate_row(row: &[String], row_number: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = field(row, 0);
    let store_type = field(row, 1);
    let location = field(row, 2);
    let contact_person = field(row, 3);
    let phone = field(row, 4);
    let email = field(row, 5);

    if name.is_empty() {
        errors.push(ValidationError::for_row(
            row_number,
            "name",
            "Name is required",
            row,
        ));
    }

    if email.is_empty() {
        errors.push(ValidationError::for_row(
            row_number,
            "email",
            "Email is required",
            row,
        ));
    } else if !is_valid_email(email) {
        errors.push(ValidationError::for_row(
            row_number,
            "email",
            "Invalid email format",
            row,
        ));
    }

    if store_type.is_empty() {
        errors.push(ValidationError::for_row(
            row_number,
            "storeType",
            "Store type is required",
            row,
        ));
    }

    if location.is_empty() {
        errors.push(ValidationError::for_row(
            row_number,
            "location",
            "Location is required",
            row,
        ));
    }

    if contact_person.is_empty() {
        errors.push(ValidationError::for_row(
            row_number,
            "contactPerson",
            "Contact person is required",
            row,
        ));
    }

    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.push(ValidationError::for_row(
            row_number,
            "phone",
            "Invalid phone format",
            row,
        ));
    }

    errors
}

/// Разобрать и провалидировать файл импорта
///
/// Представители назначаются валидным записям по кругу (round-robin)
/// в порядке переданного списка. Номер строки — позиция в
/// отфильтрованной последовательности, заголовок считается строкой 1.
pub fn process(text: &str, available_reps: &[String]) -> Result<ParsedImport, ImportError> {
    if available_reps.is_empty() {
        return Err(ImportError::NoRepsAvailable);
    }

    let rows = parse_csv(text);
    if rows.len() < 2 {
        return Err(ImportError::EmptyFile);
    }

    let mut records = Vec::new();
    let mut errors = Vec::new();
    let mut rep_cursor = 0usize;

    // Первая строка — заголовок, отбрасывается без проверки
    for (index, row) in rows[1..].iter().enumerate() {
        let row_number = index + 2;
        let row_errors = validate_row(row, row_number);

        if row_errors.is_empty() {
            let phone = field(row, 4);
            records.push(AssignedClientRecord {
                row: ClientCsvRow {
                    name: field(row, 0).to_string(),
                    store_type: field(row, 1).to_string(),
                    location: field(row, 2).to_string(),
                    contact_person: field(row, 3).to_string(),
                    phone: if phone.is_empty() {
                        None
                    } else {
                        Some(phone.to_string())
                    },
                    email: field(row, 5).to_string(),
                },
                rep_id: available_reps[rep_cursor % available_reps.len()].clone(),
            });
            rep_cursor += 1;
        } else {
            errors.extend(row_errors);
        }
    }

    Ok(ParsedImport { records, errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reps(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("rep-{}", i)).collect()
    }

    const HEADER: &str = "name,storeType,location,contactPerson,phone,email";

    #[test]
    fn quoted_comma_stays_inside_field() {
        let rows = parse_csv("a,\"New York, NY\",b");
        assert_eq!(rows, vec![vec!["a", "New York, NY", "b"]]);
    }

    #[test]
    fn quotes_are_never_emitted() {
        let rows = parse_csv("\"ABC\" Wine,x");
        assert_eq!(rows[0][0], "ABC Wine");
    }

    #[test]
    fn unmatched_quote_swallows_rest_of_line() {
        // кавычка без пары оставляет режим включённым до конца строки
        let rows = parse_csv("a,\"b,c");
        assert_eq!(rows, vec![vec!["a", "b,c"]]);
    }

    #[test]
    fn blank_lines_do_not_create_numbering_gaps() {
        let text = format!(
            "{}\n\n   \nShop,Bar,Austin,Mike,,mike@shop.com\n,Bar,Austin,Mike,,bad",
            HEADER
        );
        let parsed = process(&text, &reps(1)).unwrap();
        assert_eq!(parsed.records.len(), 1);
        // вторая строка данных получает номер 3 несмотря на пустые строки в файле
        assert!(parsed.errors.iter().all(|e| e.row == 3));
    }

    #[test]
    fn fields_are_trimmed() {
        let text = format!("{}\n  Shop , Bar , Austin , Mike , , mike@shop.com", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        assert_eq!(parsed.records[0].row.name, "Shop");
        assert_eq!(parsed.records[0].row.phone, None);
    }

    #[test]
    fn missing_name_and_email_give_two_errors() {
        let text = format!("{}\n,Bar,Austin,Mike,,", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        assert_eq!(parsed.records.len(), 0);
        let fields: Vec<&str> = parsed.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
        assert!(parsed.errors.iter().all(|e| e.row == 2));
    }

    #[test]
    fn short_row_missing_tail_is_empty_fields() {
        let text = format!("{}\nShop,Bar", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        let fields: Vec<&str> = parsed.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "location", "contactPerson"]);
    }

    #[test]
    fn invalid_email_shape_is_rejected() {
        let text = format!("{}\nShop,Bar,Austin,Mike,,not-an-email", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].field, "email");
        assert_eq!(parsed.errors[0].message, "Invalid email format");
    }

    #[test]
    fn phone_shapes() {
        for phone in ["(555) 123-4567", "555-123-4567", "555.123.4567", "5551234567"] {
            let text = format!("{}\nShop,Bar,Austin,Mike,{},m@s.com", HEADER, phone);
            let parsed = process(&text, &reps(1)).unwrap();
            assert!(parsed.errors.is_empty(), "phone {} should be valid", phone);
        }

        let text = format!("{}\nShop,Bar,Austin,Mike,555-1234,m@s.com", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].field, "phone");
    }

    #[test]
    fn empty_phone_is_allowed() {
        let text = format!("{}\nShop,Bar,Austin,Mike,,m@s.com", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.records[0].row.phone, None);
    }

    #[test]
    fn error_carries_original_row_data() {
        let text = format!("{}\nShop,Bar,Austin,Mike,,bad-email", HEADER);
        let parsed = process(&text, &reps(1)).unwrap();
        let data = parsed.errors[0].data.as_ref().unwrap();
        assert_eq!(data[0], "Shop");
        assert_eq!(data[5], "bad-email");
    }

    #[test]
    fn no_reps_fails_before_parsing() {
        let err = process("garbage that is not csv", &[]).unwrap_err();
        assert_eq!(err, ImportError::NoRepsAvailable);
    }

    #[test]
    fn empty_and_header_only_files_fail() {
        assert_eq!(process("", &reps(1)).unwrap_err(), ImportError::EmptyFile);
        assert_eq!(
            process("\n  \n\n", &reps(1)).unwrap_err(),
            ImportError::EmptyFile
        );
        assert_eq!(
            process(HEADER, &reps(1)).unwrap_err(),
            ImportError::EmptyFile
        );
    }

    #[test]
    fn reps_are_assigned_round_robin() {
        let text = format!(
            "{}\nA,Bar,X,P,,a@x.com\nB,Bar,X,P,,b@x.com\nC,Bar,X,P,,c@x.com",
            HEADER
        );
        let parsed = process(&text, &reps(2)).unwrap();
        let assigned: Vec<&str> = parsed.records.iter().map(|r| r.rep_id.as_str()).collect();
        assert_eq!(assigned, vec!["rep-1", "rep-2", "rep-1"]);
    }

    #[test]
    fn invalid_rows_do_not_advance_rotation() {
        let text = format!(
            "{}\nA,Bar,X,P,,a@x.com\n,Bar,X,P,,bad\nB,Bar,X,P,,b@x.com",
            HEADER
        );
        let parsed = process(&text, &reps(3)).unwrap();
        let assigned: Vec<&str> = parsed.records.iter().map(|r| r.rep_id.as_str()).collect();
        assert_eq!(assigned, vec!["rep-1", "rep-2"]);
    }

    #[test]
    fn records_and_errors_preserve_input_order() {
        let text = format!(
            "{}\nB,Bar,X,P,,b@x.com\n,Bar,X,P,,bad1\nA,Bar,X,P,,a@x.com\n,Bar,X,P,,bad2",
            HEADER
        );
        let parsed = process(&text, &reps(1)).unwrap();
        let names: Vec<&str> = parsed
            .records
            .iter()
            .map(|r| r.row.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
        let rows: Vec<usize> = parsed.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![3, 3, 5, 5]);
    }

    #[test]
    fn reimported_record_stays_valid() {
        let text = format!(
            "{}\nABC Wine & Spirits,Liquor Store,\"New York, NY\",John Martinez,(555) 123-4567,john@abcwine.com",
            HEADER
        );
        let first = process(&text, &reps(1)).unwrap();
        assert!(first.errors.is_empty());
        let record = &first.records[0].row;

        // сериализация обратно в ту же шестиколоночную форму
        let quote = |s: &str| {
            if s.contains(',') {
                format!("\"{}\"", s)
            } else {
                s.to_string()
            }
        };
        let line = [
            quote(&record.name),
            quote(&record.store_type),
            quote(&record.location),
            quote(&record.contact_person),
            quote(record.phone.as_deref().unwrap_or("")),
            quote(&record.email),
        ]
        .join(",");

        let second = process(&format!("{}\n{}", HEADER, line), &reps(1)).unwrap();
        assert!(second.errors.is_empty());
        assert_eq!(second.records[0].row, *record);
    }

    #[test]
    fn end_to_end_mixed_file() {
        // заголовок + 3 строки: одна валидная, невалидный email, пустое контактное лицо
        let text = format!(
            "{}\n\
             ABC Wine & Spirits,Liquor Store,\"New York, NY\",John Martinez,(555) 123-4567,john@abcwine.com\n\
             TechStart Restaurant,Restaurant,\"San Francisco, CA\",Sarah Kim,(555) 234-5678,not-an-email\n\
             GreenTech Bar & Grill,Bar,\"Austin, TX\",,(555) 345-6789,mike@greentech.com",
            HEADER
        );
        let parsed = process(&text, &reps(2)).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].row.name, "ABC Wine & Spirits");
        assert_eq!(parsed.records[0].row.location, "New York, NY");
        assert_eq!(parsed.records[0].rep_id, "rep-1");

        assert_eq!(parsed.errors.len(), 2);
        assert_eq!(parsed.errors[0].row, 3);
        assert_eq!(parsed.errors[0].field, "email");
        assert_eq!(parsed.errors[1].row, 4);
        assert_eq!(parsed.errors[1].field, "contactPerson");
    }
}
