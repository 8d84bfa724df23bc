use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap());

/// Проверка формата email
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Проверка формата телефона: (555) 123-4567, 555-123-4567, 555.123.4567
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Валидированная строка CSV-файла для импорта клиентов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCsvRow {
    pub name: String,
    #[serde(rename = "storeType")]
    pub store_type: String,
    pub location: String,
    #[serde(rename = "contactPerson")]
    pub contact_person: String,
    pub phone: Option<String>,
    pub email: String,
}

/// Ошибка валидации одной строки импорта
///
/// `row` = 0 и `field` = "file" означают ошибку уровня файла.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: String,
    pub message: String,
    /// Исходные поля строки; None для ошибок уровня файла
    pub data: Option<Vec<String>>,
}

impl ValidationError {
    pub fn for_row(row: usize, field: &str, message: &str, data: &[String]) -> Self {
        Self {
            row,
            field: field.to_string(),
            message: message.to_string(),
            data: Some(data.to_vec()),
        }
    }

    pub fn for_file(message: &str) -> Self {
        Self {
            row: 0,
            field: "file".to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

/// Результат импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientImportResult {
    #[serde(rename = "successCount")]
    pub success_count: usize,
    pub errors: Vec<ValidationError>,
}

/// Шаблон CSV-файла для скачивания
pub const CLIENT_CSV_TEMPLATE: &str = "name,storeType,location,contactPerson,phone,email\n\
ABC Wine & Spirits,Liquor Store,\"New York, NY\",John Martinez,(555) 123-4567,john@abcwine.com\n\
TechStart Restaurant,Restaurant,\"San Francisco, CA\",Sarah Kim,(555) 234-5678,sarah@techstart.com\n\
GreenTech Bar & Grill,Bar,\"Austin, TX\",Mike Thompson,(555) 345-6789,mike@greentech.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("john@abcwine.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("no domain@x.com"));
        assert!(!is_valid_email("john@abcwine"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("555-123-4567"));
        assert!(is_valid_phone("555.123.4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("phone"));
        assert!(!is_valid_phone("(555) 123-45678"));
    }

    #[test]
    fn template_has_header_and_three_rows() {
        let lines: Vec<&str> = CLIENT_CSV_TEMPLATE.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name,storeType,location,contactPerson,phone,email");
    }
}
