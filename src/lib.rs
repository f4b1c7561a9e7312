pub mod config;

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod key_value_store;
    }
}

pub mod modules {
    pub mod reports {
        pub mod core {
            pub mod classify;
            pub mod filter;
            pub mod ports;
            pub mod report;
            pub mod summary;
            pub mod view_state;
        }
        pub mod use_cases {
            pub mod triage_reports {
                pub mod handler;
                pub mod query;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod acknowledge_report {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod http_report_source;
                pub mod in_memory_report_source;
                pub mod view_state_store;
            }
        }
    }
}

pub mod shell;
