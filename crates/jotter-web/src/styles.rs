//! Shared inline styles.

pub const PRIMARY_BUTTON: &str = "
    background: #1976d2;
    color: #ffffff;
    border: none;
    border-radius: 4px;
    padding: 8px 16px;
    font-size: 14px;
    font-weight: 500;
    cursor: pointer;
";

pub const TEXT_BUTTON: &str = "
    background: transparent;
    color: #1976d2;
    border: none;
    border-radius: 4px;
    padding: 8px 12px;
    font-size: 14px;
    cursor: pointer;
";

pub const DANGER_BUTTON: &str = "
    background: transparent;
    color: #d32f2f;
    border: none;
    border-radius: 4px;
    padding: 8px 12px;
    font-size: 14px;
    cursor: pointer;
";

pub const PANEL: &str = "
    background: #ffffff;
    border-radius: 4px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.2);
    padding: 24px;
";

pub const INPUT: &str = "
    width: 100%;
    box-sizing: border-box;
    padding: 10px 12px;
    border: 1px solid #bdbdbd;
    border-radius: 4px;
    font-size: 15px;
    font-family: inherit;
";

pub const FIELD_ERROR: &str = "color: #d32f2f; font-size: 12px; margin: 4px 0 0;";

pub const ALERT_ERROR: &str = "
    background: #fdeded;
    color: #5f2120;
    border-radius: 4px;
    padding: 12px 16px;
    margin-bottom: 16px;
";
