// Hand-maintained Diesel schema for the three Modelfolio tables.
// Keep in sync with the SQL in migrations/.

diesel::table! {
    portfolio_navs (date, portfolio_name) {
        date -> Text,
        portfolio_name -> Text,
        nav -> Double,
    }
}

diesel::table! {
    factor_returns (date) {
        date -> Text,
        mkt_rf -> Double,
        smb -> Double,
        hml -> Double,
        rmw -> Double,
        cma -> Double,
        rf -> Double,
    }
}

diesel::table! {
    factor_loadings (portfolio_name) {
        portfolio_name -> Text,
        alpha -> Double,
        beta_mkt -> Double,
        beta_smb -> Double,
        beta_hml -> Double,
        beta_rmw -> Double,
        beta_cma -> Double,
        r_squared -> Double,
        observations -> BigInt,
        computed_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(portfolio_navs, factor_returns, factor_loadings);
