pub mod category_service;
pub mod income_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::{CategoryPatch, CategoryRemoval, CategoryService, Upsert};
pub use income_service::IncomeService;
pub use summary_service::{BudgetStatus, CategorySpend, MonthSummary, SummaryService};
pub use transaction_service::{NewTransaction, TransactionService};
