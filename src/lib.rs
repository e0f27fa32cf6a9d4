pub mod core {
    pub mod config;
    pub mod error;
    pub mod routes;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod handlers {
    pub mod auth;
    pub mod catalog;
    pub mod cors;
    pub mod health;
    pub mod static_files;
    pub mod users;
}

pub mod models {
    pub mod requests;
    pub mod user;
}

pub mod stores {
    pub mod json_list;
    pub mod user_table;
}

pub mod table {
    pub mod codec;
}

pub mod utils {
    pub mod client_ip;
    pub mod fs;
    pub mod mime;
    pub mod time;
}
