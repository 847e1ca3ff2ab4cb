use chrono::{DateTime, Utc};

use crate::domain::order::OrderStatus;

/// Separator between the currency symbol and the amount (a no-break space).
const CURRENCY_SEPARATOR: char = '\u{a0}';

/// Format minor units (centavos) as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn currency(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let magnitude = minor_units.unsigned_abs();
    let reais = magnitude / 100;
    let centavos = magnitude % 100;

    format!(
        "{}R${}{},{:02}",
        sign,
        CURRENCY_SEPARATOR,
        group_thousands(reais),
        centavos
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped
}

/// `dd/MM/yyyy`, taken in UTC.
pub fn date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d/%m/%Y").to_string()
}

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pendente",
        OrderStatus::Approved => "Aprovado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_currency_groups_and_pads() {
        assert_eq!(currency(0), "R$\u{a0}0,00");
        assert_eq!(currency(5), "R$\u{a0}0,05");
        assert_eq!(currency(1500), "R$\u{a0}15,00");
        assert_eq!(currency(123456), "R$\u{a0}1.234,56");
        assert_eq!(currency(100000000), "R$\u{a0}1.000.000,00");
        assert_eq!(currency(-250), "-R$\u{a0}2,50");
    }

    #[test]
    fn test_date_is_day_month_year() {
        let timestamp = Utc.with_ymd_and_hms(2022, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(date(&timestamp), "07/03/2022");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(OrderStatus::Pending), "Pendente");
        assert_eq!(status_label(OrderStatus::Approved), "Aprovado");
    }
}
