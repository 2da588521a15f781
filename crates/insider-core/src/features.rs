//! Fixed feature-column definitions for the trade-level and wallet-level models.
//!
//! The data pipeline that produces the input CSVs writes a superset of these
//! columns; loading looks them up by name and drops any that are absent.

/// Feature columns for the trade-level model.
pub const TRADE_FEATURES: [&str; 16] = [
    "wallet_age_days",
    "wallet_total_trades",
    "wallet_total_volume",
    "wallet_markets_traded",
    "wallet_market_concentration",
    "wallet_avg_trade_size",
    "wallet_win_rate",
    "trade_size_usd",
    "trade_size_vs_wallet_avg",
    "odds_at_trade",
    "is_buying_underdog",
    "hours_to_resolution",
    "is_final_24h",
    "position_vs_liquidity",
    "is_new_market_for_wallet",
    "is_single_market_wallet",
];

/// Feature columns for the wallet-level model.
pub const WALLET_FEATURES: [&str; 15] = [
    "age_days",
    "total_trades",
    "total_volume",
    "markets_traded",
    "market_concentration",
    "avg_trade_size",
    "win_rate",
    "low_odds_win_rate",
    "low_odds_wins",
    "low_odds_attempts",
    "avg_hours_to_resolution",
    "final_24h_trade_rate",
    "final_24h_win_rate",
    "single_market_focus",
    "contrarian_rate",
];

/// Human-readable description for a feature.
///
/// Features without a known description fall back to the raw column name.
pub fn description(feature: &str) -> &str {
    match feature {
        "wallet_age_days" => "Days since wallet first seen",
        "wallet_markets_traded" => "Number of unique markets traded",
        "wallet_market_concentration" => "How focused on few markets (0-1)",
        "trade_size_usd" => "Size of trade in USD",
        "odds_at_trade" => "Market odds when trading",
        "is_buying_underdog" => "Betting on <30% outcome",
        "hours_to_resolution" => "Hours until market resolution",
        "is_final_24h" => "Trading in final 24 hours",
        "is_new_market_for_wallet" => "First trade in this market",
        "is_single_market_wallet" => "Wallet trades <= 3 markets total",
        "low_odds_win_rate" => "Win rate on low-odds bets",
        "final_24h_trade_rate" => "Fraction of trades in final 24h",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_list_sizes() {
        assert_eq!(TRADE_FEATURES.len(), 16);
        assert_eq!(WALLET_FEATURES.len(), 15);
    }

    #[test]
    fn test_known_description() {
        assert_eq!(
            description("odds_at_trade"),
            "Market odds when trading"
        );
    }

    #[test]
    fn test_unknown_description_falls_back_to_name() {
        assert_eq!(description("contrarian_rate"), "contrarian_rate");
        assert_eq!(description("not_a_feature"), "not_a_feature");
    }

    #[test]
    fn test_no_duplicate_columns() {
        let mut trade: Vec<_> = TRADE_FEATURES.to_vec();
        trade.sort_unstable();
        trade.dedup();
        assert_eq!(trade.len(), TRADE_FEATURES.len());

        let mut wallet: Vec<_> = WALLET_FEATURES.to_vec();
        wallet.sort_unstable();
        wallet.dedup();
        assert_eq!(wallet.len(), WALLET_FEATURES.len());
    }
}
