// ═══════════════════════════════════════════════════════════════════
// Model Tests: validation, Period arithmetic, Market mapping,
// preferences and serde shapes
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use uuid::Uuid;

use finmate_core::errors::CoreError;
use finmate_core::models::forex::NewForexOperation;
use finmate_core::models::investment::{NewInvestment, TradeAction};
use finmate_core::models::period::Period;
use finmate_core::models::position::PositionKey;
use finmate_core::models::preferences::{mask_amount, Preferences};
use finmate_core::models::quote::Market;
use finmate_core::models::transaction::{NewTransaction, TransactionAction};
use finmate_core::models::transfer::NewTransfer;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_transaction(amount: f64, currency: &str, category: &str) -> NewTransaction {
    NewTransaction {
        description: "  lunch  ".into(),
        amount,
        currency: currency.into(),
        category: category.into(),
        date: date(2025, 3, 10),
        action: TransactionAction::Expense,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Input validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn transaction_is_normalized() {
        let tx = new_transaction(12.5, " ars ", " Food ").validate().unwrap();
        assert_eq!(tx.currency, "ARS");
        assert_eq!(tx.category, "Food");
        assert_eq!(tx.description, "lunch");
    }

    #[test]
    fn transaction_rejects_zero_amount() {
        let err = new_transaction(0.0, "USD", "Food").validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn transaction_rejects_nan_amount() {
        assert!(new_transaction(f64::NAN, "USD", "Food").validate().is_err());
    }

    #[test]
    fn transaction_rejects_bad_currency() {
        assert!(new_transaction(10.0, "DOLLARS", "Food").validate().is_err());
        assert!(new_transaction(10.0, "U1D", "Food").validate().is_err());
    }

    #[test]
    fn transaction_rejects_blank_category() {
        assert!(new_transaction(10.0, "USD", "   ").validate().is_err());
    }

    #[test]
    fn into_record_keeps_fields() {
        let id = Uuid::new_v4();
        let tx = new_transaction(10.0, "USD", "Food").validate().unwrap().into_record(id);
        assert_eq!(tx.id, id);
        assert!(tx.is_expense());
        assert!(!tx.is_income());
    }

    #[test]
    fn investment_uppercases_symbol() {
        let inv = NewInvestment {
            date: date(2025, 1, 2),
            action: TradeAction::Buy,
            category: "Cripto".into(),
            symbol: " btc ".into(),
            platform: "Binance".into(),
            amount: 0.5,
            price: 60_000.0,
            currency: "usd".into(),
            description: String::new(),
        }
        .validate()
        .unwrap();
        assert_eq!(inv.symbol, "BTC");
        assert_eq!(inv.currency, "USD");
        assert_eq!(inv.into_record(Uuid::new_v4()).total(), 30_000.0);
    }

    #[test]
    fn investment_rejects_negative_price() {
        let result = NewInvestment {
            date: date(2025, 1, 2),
            action: TradeAction::Sell,
            category: "Stock".into(),
            symbol: "AAPL".into(),
            platform: "IOL".into(),
            amount: 1.0,
            price: -5.0,
            currency: "USD".into(),
            description: String::new(),
        }
        .validate();
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    fn forex(total: Option<f64>, to: &str) -> NewForexOperation {
        NewForexOperation {
            date: date(2025, 2, 1),
            action: TradeAction::Buy,
            amount: 100.0,
            currency_from: "ars".into(),
            currency_to: to.into(),
            price: 1_000.0,
            total,
            description: String::new(),
        }
    }

    #[test]
    fn forex_total_defaults_to_amount_times_price() {
        let op = forex(None, "usd").validate().unwrap();
        assert_eq!(op.total, Some(100_000.0));
        assert_eq!(op.into_record(Uuid::new_v4()).total, 100_000.0);
    }

    #[test]
    fn forex_keeps_explicit_total() {
        let op = forex(Some(99_500.0), "USD").validate().unwrap();
        assert_eq!(op.total, Some(99_500.0));
    }

    #[test]
    fn forex_rejects_same_currency() {
        assert!(forex(None, "ARS").validate().is_err());
    }

    fn transfer(from: &str, to: &str) -> NewTransfer {
        NewTransfer {
            date: date(2025, 2, 3),
            wallet_from: from.into(),
            wallet_to: to.into(),
            initial_amount: 100.0,
            final_amount: 99.0,
            currency: "usd".into(),
            description: String::new(),
        }
    }

    #[test]
    fn transfer_is_normalized() {
        let t = transfer(" Bank ", "Broker").validate().unwrap();
        assert_eq!(t.wallet_from, "Bank");
        assert_eq!(t.currency, "USD");
        assert_eq!(t.into_record(Uuid::new_v4()).fee(), 1.0);
    }

    #[test]
    fn transfer_rejects_same_wallet_ignoring_case() {
        assert!(transfer("Bank", "bank").validate().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Period
// ═══════════════════════════════════════════════════════════════════

mod period {
    use super::*;

    #[test]
    fn parse_month() {
        assert_eq!(
            Period::parse_month("2025-03").unwrap(),
            Period::Month { year: 2025, month: 3 }
        );
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert!(Period::parse_month("2025").is_err());
        assert!(Period::parse_month("2025-13").is_err());
        assert!(Period::parse_month("march").is_err());
    }

    #[test]
    fn january_previous_is_december_of_prior_year() {
        let jan = Period::month(2025, 1).unwrap();
        assert_eq!(jan.previous(), Some(Period::Month { year: 2024, month: 12 }));
    }

    #[test]
    fn previous_of_mid_year_month() {
        let jul = Period::month(2025, 7).unwrap();
        assert_eq!(jul.previous(), Some(Period::Month { year: 2025, month: 6 }));
    }

    #[test]
    fn month_bounds_handle_leap_february() {
        let feb = Period::month(2024, 2).unwrap();
        assert_eq!(feb.bounds(), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(feb.num_days(), Some(29));
    }

    #[test]
    fn december_bounds() {
        let dec = Period::month(2025, 12).unwrap();
        assert_eq!(dec.bounds(), Some((date(2025, 12, 1), date(2025, 12, 31))));
    }

    #[test]
    fn range_previous_has_same_length() {
        let r = Period::range(date(2025, 3, 10), date(2025, 3, 19)).unwrap();
        assert_eq!(
            r.previous(),
            Some(Period::Range { from: date(2025, 2, 28), to: date(2025, 3, 9) })
        );
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(Period::range(date(2025, 3, 2), date(2025, 3, 1)).is_err());
    }

    #[test]
    fn all_contains_everything_and_has_no_previous() {
        assert!(Period::All.contains(date(1999, 1, 1)));
        assert_eq!(Period::All.previous(), None);
        assert_eq!(Period::All.bounds(), None);
    }

    #[test]
    fn contains_is_inclusive() {
        let m = Period::month_of(date(2025, 4, 15));
        assert!(m.contains(date(2025, 4, 1)));
        assert!(m.contains(date(2025, 4, 30)));
        assert!(!m.contains(date(2025, 5, 1)));
    }

    #[test]
    fn display() {
        assert_eq!(Period::month(2025, 3).unwrap().to_string(), "2025-03");
        assert_eq!(Period::Year { year: 2024 }.to_string(), "2024");
        assert_eq!(Period::All.to_string(), "all");
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_value(Period::month(2025, 3).unwrap()).unwrap();
        assert_eq!(json["kind"], "month");
        assert_eq!(json["month"], 3);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Market & keys
// ═══════════════════════════════════════════════════════════════════

mod market {
    use super::*;

    #[test]
    fn crypto_categories() {
        assert_eq!(Market::from_category("Cripto"), Some(Market::Crypto));
        assert_eq!(Market::from_category("crypto"), Some(Market::Crypto));
    }

    #[test]
    fn stock_categories() {
        assert_eq!(Market::from_category("Acciones"), Some(Market::Stock));
        assert_eq!(Market::from_category("CEDEAR"), Some(Market::Stock));
        assert_eq!(Market::from_category("ETF"), Some(Market::Stock));
    }

    #[test]
    fn unquoted_categories() {
        assert_eq!(Market::from_category("Plazo fijo"), None);
        assert_eq!(Market::from_category(""), None);
    }

    #[test]
    fn position_key_normalizes_symbol_and_currency() {
        let key = PositionKey::new("btc", "Binance", "usd");
        assert_eq!(key.to_string(), "BTC-Binance-USD");
        assert_eq!(key, PositionKey::new("BTC", "Binance", "USD"));
    }

    #[test]
    fn action_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionAction::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&TradeAction::Sell).unwrap(), "\"sell\"");
        let parsed: TradeAction = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(parsed, TradeAction::Buy);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Preferences
// ═══════════════════════════════════════════════════════════════════

mod preferences {
    use super::*;

    #[test]
    fn mask_amount_visible_groups_thousands() {
        assert_eq!(mask_amount(1234.5, "USD", true), "USD 1,234.50");
        assert_eq!(mask_amount(1_000_000.0, "ARS", true), "ARS 1,000,000.00");
        assert_eq!(mask_amount(999.999, "EUR", true), "EUR 1,000.00");
    }

    #[test]
    fn mask_amount_negative() {
        assert_eq!(mask_amount(-42.0, "USD", true), "USD -42.00");
    }

    #[test]
    fn mask_amount_hidden() {
        assert_eq!(mask_amount(1234.5, "USD", false), "USD ****");
    }

    #[test]
    fn toggles_flip_and_report_state() {
        let mut prefs = Preferences::default();
        assert!(prefs.toggle_values());
        assert_eq!(prefs.display_amount(10.0, "USD"), "USD ****");
        assert!(!prefs.toggle_values());
        assert_eq!(prefs.display_amount(10.0, "USD"), "USD 10.00");
        assert!(prefs.toggle_sidebar());
    }

    #[test]
    fn missing_fields_default() {
        let prefs: Preferences = serde_json::from_str(r#"{"hide_values": true}"#).unwrap();
        assert!(prefs.hide_values);
        assert!(!prefs.sidebar_collapsed);
        assert!(!prefs.telegram_linked);
    }
}
