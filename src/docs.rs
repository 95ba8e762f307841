// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::unlock,

        // --- Tools ---
        handlers::tools::profit_calculator,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::update_status,
        handlers::orders::update_collection,
        handlers::orders::block_customer,
        handlers::orders::share_link,
        handlers::orders::product_suggestions,
        handlers::risk::check_risk,

        // --- Delivery ---
        handlers::delivery::list_rates,
        handlers::delivery::save_rates,
        handlers::delivery::resolve_rate,

        // --- Finance ---
        handlers::finance::list_expenses,
        handlers::finance::create_expense,
        handlers::finance::delete_expense,
        handlers::finance::list_suppliers,
        handlers::finance::create_supplier,
        handlers::finance::get_supplier_ledger,
        handlers::finance::add_ledger_entry,

        // --- Campaigns ---
        handlers::campaigns::list_campaigns,
        handlers::campaigns::create_campaign,
        handlers::campaigns::archive_campaign,

        // --- Blacklist ---
        handlers::blacklist::list_blacklist,
        handlers::blacklist::add_to_blacklist,
        handlers::blacklist::remove_from_blacklist,

        // --- Dashboard ---
        handlers::dashboard::get_overview,
        handlers::dashboard::get_products,
        handlers::dashboard::get_campaigns,
        handlers::dashboard::get_snapshot,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UnlockPayload,

            // --- Calculator ---
            models::calculator::Currency,
            models::calculator::ProfitInput,
            models::calculator::ProfitVerdict,
            models::calculator::ProfitAdvice,
            models::calculator::ProfitResult,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::OrderPeriod,
            models::orders::Order,
            models::orders::OrderPayload,
            models::orders::UpdateStatusPayload,
            models::orders::UpdateCollectionPayload,
            models::orders::BlockCustomerPayload,
            models::orders::ShareLink,
            models::risk::RiskTier,
            models::risk::RiskAssessment,

            // --- Delivery ---
            models::delivery::DeliveryRate,
            models::delivery::GovernorateRate,
            models::delivery::UpsertRatesPayload,
            models::delivery::ResolvedDeliveryCost,

            // --- Finance ---
            models::finance::TransactionType,
            models::finance::Expense,
            models::finance::CreateExpensePayload,
            models::finance::Supplier,
            models::finance::SupplierLedgerEntry,
            models::finance::CreateSupplierPayload,
            models::finance::CreateLedgerEntryPayload,
            models::finance::SupplierWithBalance,
            models::finance::SupplierLedgerView,

            // --- Campaigns ---
            models::campaigns::Platform,
            models::campaigns::Campaign,
            models::campaigns::CreateCampaignPayload,
            models::campaigns::CampaignPerformance,
            models::campaigns::CampaignReport,

            // --- Blacklist ---
            models::blacklist::BlacklistEntry,
            models::blacklist::CreateBlacklistPayload,

            // --- Dashboard ---
            models::dashboard::FinancialSummary,
            models::dashboard::GovernorateCount,
            models::dashboard::OrderInsights,
            models::dashboard::DashboardOverview,
            models::dashboard::ProductStat,
            models::dashboard::ProductReport,
            models::dashboard::AccountSnapshot,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro e Login"),
        (name = "Users", description = "Dados do Usuário e Liberação do App"),
        (name = "Tools", description = "Calculadora de Lucro"),
        (name = "Orders", description = "Pedidos, Risco do Cliente e WhatsApp"),
        (name = "Delivery", description = "Tarifas de Entrega por Província"),
        (name = "Finance", description = "Despesas e Conta Corrente de Fornecedores"),
        (name = "Campaigns", description = "Campanhas de Anúncio"),
        (name = "Blacklist", description = "Telefones Bloqueados"),
        (name = "Dashboard", description = "Indicadores e Relatórios")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_bearer_scheme_and_business_paths() {
        let doc = ApiDoc::openapi();

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));

        assert!(doc.paths.paths.contains_key("/api/orders"));
        assert!(doc.paths.paths.contains_key("/api/orders/{id}/block"));
        assert!(doc.paths.paths.contains_key("/api/suppliers/{id}/ledger"));
        assert!(doc.paths.paths.contains_key("/api/tools/profit-calculator"));
    }
}
