use async_graphql::{EmptySubscription, Schema};

pub use crate::modules::reports::use_cases::acknowledge_report::inbound::graphql::MutationRoot;
pub use crate::modules::reports::use_cases::triage_reports::inbound::graphql::QueryRoot;
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}
