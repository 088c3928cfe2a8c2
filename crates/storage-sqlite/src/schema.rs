// Diesel schema for the wallet service's SQLite database. Hand-maintained
// alongside `migrations/` rather than CLI-generated, since this crate keeps
// no `diesel.toml`/database connection as part of the build.

diesel::table! {
    users (id) {
        id -> Text,
        email -> Text,
        username -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    banks (id) {
        id -> Text,
        name -> Text,
        short_code -> Text,
    }
}

diesel::table! {
    wallets (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        base_ccy -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    deposit_accounts (id) {
        id -> Text,
        wallet_id -> Text,
        bank_id -> Text,
        name -> Text,
        account_type -> Text,
        currency -> Text,
        account_number_ciphertext -> Binary,
        account_number_fingerprint -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        account_id -> Text,
        date -> Date,
        amount -> Text,
        balance_before -> Text,
        balance_after -> Text,
        description -> Text,
        category -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    capital_gains (id) {
        id -> Text,
        transaction_id -> Text,
        account_id -> Text,
        kind -> Text,
    }
}

diesel::table! {
    brokerage_accounts (id) {
        id -> Text,
        wallet_id -> Text,
        bank_id -> Text,
        name -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    brokerage_deposit_links (id) {
        id -> Text,
        brokerage_account_id -> Text,
        deposit_account_id -> Text,
        currency -> Text,
    }
}

diesel::table! {
    instruments (id) {
        id -> Text,
        symbol -> Text,
        instrument_type -> Text,
        reporting_currency -> Text,
        mic -> Nullable<Text>,
    }
}

diesel::table! {
    holdings (account_id, instrument_id) {
        account_id -> Text,
        instrument_id -> Text,
        quantity -> Text,
        avg_cost -> Text,
    }
}

diesel::table! {
    brokerage_events (id) {
        id -> Text,
        account_id -> Text,
        instrument_id -> Text,
        trade_at -> Timestamp,
        seq -> BigInt,
        event_type -> Text,
        quantity -> Nullable<Text>,
        unit_price -> Nullable<Text>,
        currency -> Nullable<Text>,
        split_ratio -> Nullable<Text>,
    }
}

diesel::table! {
    metal_holdings (id) {
        id -> Text,
        wallet_id -> Text,
        metal -> Text,
        grams -> Text,
        cost_basis -> Text,
        cost_currency -> Text,
        quote_symbol -> Text,
    }
}

diesel::table! {
    real_estates (id) {
        id -> Text,
        wallet_id -> Text,
        name -> Text,
        property_type -> Text,
        country -> Text,
        city -> Text,
        area -> Text,
        purchase_price -> Text,
        purchase_currency -> Text,
    }
}

diesel::table! {
    real_estate_prices (id) {
        id -> Text,
        property_type -> Text,
        country -> Nullable<Text>,
        city -> Nullable<Text>,
        currency -> Text,
        price_per_m2 -> Text,
        as_of -> Date,
    }
}

diesel::table! {
    debts (id) {
        id -> Text,
        wallet_id -> Text,
        name -> Text,
        principal -> Text,
        currency -> Text,
        monthly_payment -> Text,
    }
}

diesel::table! {
    recurring_expenses (id) {
        id -> Text,
        wallet_id -> Text,
        name -> Text,
        amount -> Text,
        currency -> Text,
        day_of_month -> Integer,
    }
}

diesel::table! {
    year_goals (id) {
        id -> Text,
        wallet_id -> Text,
        year -> Integer,
        name -> Text,
        target_amount -> Text,
        currency -> Text,
        current_amount -> Text,
    }
}

diesel::table! {
    user_notes (id) {
        id -> Text,
        user_id -> Text,
        body -> Text,
    }
}

diesel::table! {
    fx_monthly_snapshots (month_key) {
        month_key -> Text,
        rates_json -> Text,
        captured_at -> Timestamp,
    }
}

diesel::table! {
    deposit_account_monthly_snapshots (account_id, month_key) {
        account_id -> Text,
        month_key -> Text,
        available -> Text,
        currency -> Text,
    }
}

diesel::table! {
    brokerage_account_monthly_snapshots (account_id, month_key) {
        account_id -> Text,
        month_key -> Text,
        cash -> Text,
        stocks -> Text,
        currency -> Text,
    }
}

diesel::table! {
    metal_holding_monthly_snapshots (holding_id, month_key) {
        holding_id -> Text,
        month_key -> Text,
        value -> Text,
        currency -> Text,
    }
}

diesel::table! {
    real_estate_monthly_snapshots (real_estate_id, month_key) {
        real_estate_id -> Text,
        month_key -> Text,
        value -> Text,
        currency -> Text,
    }
}

diesel::joinable!(deposit_accounts -> wallets (wallet_id));
diesel::joinable!(deposit_accounts -> banks (bank_id));
diesel::joinable!(brokerage_accounts -> wallets (wallet_id));
diesel::joinable!(brokerage_accounts -> banks (bank_id));
diesel::joinable!(transactions -> deposit_accounts (account_id));
diesel::joinable!(holdings -> brokerage_accounts (account_id));
diesel::joinable!(holdings -> instruments (instrument_id));
diesel::joinable!(brokerage_events -> brokerage_accounts (account_id));
diesel::joinable!(brokerage_events -> instruments (instrument_id));
diesel::joinable!(metal_holdings -> wallets (wallet_id));
diesel::joinable!(real_estates -> wallets (wallet_id));
diesel::joinable!(deposit_account_monthly_snapshots -> deposit_accounts (account_id));
diesel::joinable!(brokerage_account_monthly_snapshots -> brokerage_accounts (account_id));
diesel::joinable!(metal_holding_monthly_snapshots -> metal_holdings (holding_id));
diesel::joinable!(real_estate_monthly_snapshots -> real_estates (real_estate_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    banks,
    wallets,
    deposit_accounts,
    transactions,
    capital_gains,
    brokerage_accounts,
    brokerage_deposit_links,
    instruments,
    holdings,
    brokerage_events,
    metal_holdings,
    real_estates,
    real_estate_prices,
    debts,
    recurring_expenses,
    year_goals,
    user_notes,
    fx_monthly_snapshots,
    deposit_account_monthly_snapshots,
    brokerage_account_monthly_snapshots,
    metal_holding_monthly_snapshots,
    real_estate_monthly_snapshots,
);
