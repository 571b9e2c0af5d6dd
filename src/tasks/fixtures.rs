//! Fixture names and seed data shared by several exercises

use crate::checker::CheckContext;

/// Database used by exercises 2-5
pub const EXERCISE_DB: &str = "hbtn_0d_2";

/// Database used by exercises 6-9
pub const USA_DB: &str = "hbtn_0d_usa";

pub const STATES: &str = "states";
pub const CITIES: &str = "cities";

/// First-round state seed; California gets id 1
pub const STATES_SEED: [&str; 4] = ["California", "Arizona", "Texas", "New York"];

/// Re-seed with California at id 3, to catch hard-coded keys
pub const STATES_RESEED: [&str; 4] = ["Texas", "Arizona", "California", "New York"];

pub fn create_database(ctx: &CheckContext<'_>, database: &str) {
    ctx.query(&format!("CREATE DATABASE IF NOT EXISTS {};", database));
}

pub fn create_states_table(ctx: &CheckContext<'_>) {
    ctx.query(&format!(
        "CREATE TABLE IF NOT EXISTS {db}.{states} (\
         id INT AUTO_INCREMENT PRIMARY KEY, \
         name VARCHAR(256) NOT NULL);",
        db = USA_DB,
        states = STATES
    ));
}

pub fn create_cities_table(ctx: &CheckContext<'_>) {
    ctx.query(&format!(
        "CREATE TABLE IF NOT EXISTS {db}.{cities} (\
         id INT AUTO_INCREMENT PRIMARY KEY, \
         state_id INT NOT NULL, \
         name VARCHAR(256) NOT NULL, \
         FOREIGN KEY (state_id) REFERENCES {db}.{states}(id));",
        db = USA_DB,
        cities = CITIES,
        states = STATES
    ));
}

/// Drop both USA tables, cities first because of the foreign key
pub fn drop_usa_tables(ctx: &CheckContext<'_>) {
    let inspector = ctx.inspector();
    inspector.drop_table(CITIES, Some(USA_DB));
    inspector.drop_table(STATES, Some(USA_DB));
}

/// Empty both USA tables, cities first
pub fn clear_usa_tables(ctx: &CheckContext<'_>) {
    let inspector = ctx.inspector();
    inspector.clear_table(CITIES, USA_DB);
    inspector.clear_table(STATES, USA_DB);
}

/// Drop the USA tables and then the database itself
pub fn drop_usa(ctx: &CheckContext<'_>) {
    drop_usa_tables(ctx);
    ctx.inspector().drop_database(USA_DB);
}

/// Recreate empty `states` and `cities` tables and insert the given rows
///
/// States get ids 1.. in slice order; each city names its state by id.
pub fn seed_usa(ctx: &CheckContext<'_>, states: &[&str], cities: &[(u32, &str)]) {
    create_database(ctx, USA_DB);
    drop_usa_tables(ctx);
    create_states_table(ctx);
    create_cities_table(ctx);

    let state_values: Vec<String> = states.iter().map(|s| format!("('{}')", s)).collect();
    ctx.query(&format!(
        "INSERT INTO {}.{} (name) VALUES {};",
        USA_DB,
        STATES,
        state_values.join(", ")
    ));

    let city_values: Vec<String> = cities
        .iter()
        .map(|(state_id, name)| format!("({}, '{}')", state_id, name))
        .collect();
    ctx.query(&format!(
        "INSERT INTO {}.{} (state_id, name) VALUES {};",
        USA_DB,
        CITIES,
        city_values.join(", ")
    ));
}
