//! Initial schema: tenants, trading parties, partnerships, wallets, plans,
//! workflow history, and the approval cascade tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Enum types
CREATE TYPE partnership_status AS ENUM ('active', 'suspended', 'ended');
CREATE TYPE wallet_status AS ENUM ('open', 'closed');
CREATE TYPE jbp_status AS ENUM ('draft', 'negotiation', 'approved', 'executing');
CREATE TYPE asset_type AS ENUM ('banner', 'video', 'post', 'print', 'display', 'sampling');
CREATE TYPE history_action AS ENUM ('created', 'submitted', 'approved', 'reopened', 'started');
CREATE TYPE campaign_status AS ENUM ('planned', 'active', 'completed');
CREATE TYPE campaign_item_status AS ENUM ('draft', 'approved', 'rejected');
CREATE TYPE execution_plan_status AS ENUM ('executing', 'completed');
CREATE TYPE execution_task_status AS ENUM ('pending', 'done');

-- Tenants
CREATE TABLE tenants (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Trading parties
CREATE TABLE suppliers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_suppliers_tenant ON suppliers(tenant_id);

CREATE TABLE retails (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_retails_tenant ON retails(tenant_id);

-- Users (identity claims; role/channel stay free-form strings)
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID REFERENCES tenants(id) ON DELETE CASCADE,
    email VARCHAR(255) NOT NULL UNIQUE,
    role VARCHAR(50) NOT NULL,
    channel VARCHAR(50) NOT NULL,
    supplier_id UUID REFERENCES suppliers(id) ON DELETE SET NULL,
    retail_id UUID REFERENCES retails(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_users_tenant ON users(tenant_id);

-- Partnerships: validity window evaluated lazily at query time
CREATE TABLE partnerships (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    retail_id UUID NOT NULL REFERENCES retails(id) ON DELETE CASCADE,
    status partnership_status NOT NULL DEFAULT 'active',
    valid_from TIMESTAMPTZ,
    valid_to TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_partnership UNIQUE (supplier_id, retail_id)
);
CREATE INDEX idx_partnerships_supplier ON partnerships(supplier_id) WHERE status = 'active';
CREATE INDEX idx_partnerships_retail ON partnerships(retail_id) WHERE status = 'active';

-- Wallets: one budget envelope per (supplier, year)
CREATE TABLE wallets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    year INTEGER NOT NULL,
    total_budget NUMERIC(18, 2) NOT NULL,
    consumed_budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status wallet_status NOT NULL DEFAULT 'open',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_wallet_supplier_year UNIQUE (supplier_id, year),
    CONSTRAINT chk_wallet_consumed_bounds CHECK (consumed_budget >= 0 AND consumed_budget <= total_budget)
);
CREATE INDEX idx_wallets_supplier ON wallets(supplier_id, year);

-- Marketing assets
CREATE TABLE assets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    asset_type asset_type NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_assets_tenant ON assets(tenant_id);

-- Stores
CREATE TABLE stores (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    retail_id UUID NOT NULL REFERENCES retails(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_stores_retail ON stores(retail_id);

-- Joint business plans
CREATE TABLE jbps (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    retail_id UUID NOT NULL REFERENCES retails(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    status jbp_status NOT NULL DEFAULT 'draft',
    total_budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    wallet_id UUID REFERENCES wallets(id) ON DELETE SET NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    created_by UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_jbp_dates CHECK (end_date >= start_date)
);
CREATE INDEX idx_jbps_tenant ON jbps(tenant_id);
CREATE INDEX idx_jbps_supplier ON jbps(supplier_id);
CREATE INDEX idx_jbps_retail ON jbps(retail_id);

CREATE TABLE jbp_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    jbp_id UUID NOT NULL REFERENCES jbps(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    asset_id UUID REFERENCES assets(id) ON DELETE SET NULL,
    budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    start_date DATE,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_jbp_items_jbp ON jbp_items(jbp_id);

CREATE TABLE jbp_item_stores (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    jbp_item_id UUID NOT NULL REFERENCES jbp_items(id) ON DELETE CASCADE,
    store_id UUID NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_item_store UNIQUE (jbp_item_id, store_id)
);

-- Workflow history: append-only audit trail
CREATE TABLE workflow_history (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    jbp_id UUID NOT NULL REFERENCES jbps(id) ON DELETE CASCADE,
    action history_action NOT NULL,
    from_status jbp_status NOT NULL,
    to_status jbp_status NOT NULL,
    actor_id UUID NOT NULL REFERENCES users(id),
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_workflow_history_jbp ON workflow_history(jbp_id, created_at);

-- Approval cascade: campaigns
CREATE TABLE campaigns (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    jbp_id UUID NOT NULL REFERENCES jbps(id) ON DELETE CASCADE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    retail_id UUID REFERENCES retails(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    status campaign_status NOT NULL DEFAULT 'planned',
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_campaigns_jbp ON campaigns(jbp_id);

CREATE TABLE campaign_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    campaign_id UUID NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
    jbp_item_id UUID NOT NULL REFERENCES jbp_items(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    notes TEXT NOT NULL,
    status campaign_item_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Approval cascade: in-store execution
CREATE TABLE execution_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tenant_id UUID NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
    jbp_id UUID NOT NULL REFERENCES jbps(id) ON DELETE CASCADE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    retail_id UUID REFERENCES retails(id) ON DELETE SET NULL,
    name VARCHAR(255) NOT NULL,
    status execution_plan_status NOT NULL DEFAULT 'executing',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_execution_plans_jbp ON execution_plans(jbp_id);

CREATE TABLE execution_tasks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    execution_plan_id UUID NOT NULL REFERENCES execution_plans(id) ON DELETE CASCADE,
    jbp_item_id UUID NOT NULL REFERENCES jbp_items(id) ON DELETE CASCADE,
    store_id UUID NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    status execution_task_status NOT NULL DEFAULT 'pending',
    checklist TEXT NOT NULL,
    deadline DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX idx_execution_tasks_plan ON execution_tasks(execution_plan_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS execution_tasks CASCADE;
DROP TABLE IF EXISTS execution_plans CASCADE;
DROP TABLE IF EXISTS campaign_items CASCADE;
DROP TABLE IF EXISTS campaigns CASCADE;
DROP TABLE IF EXISTS workflow_history CASCADE;
DROP TABLE IF EXISTS jbp_item_stores CASCADE;
DROP TABLE IF EXISTS jbp_items CASCADE;
DROP TABLE IF EXISTS jbps CASCADE;
DROP TABLE IF EXISTS stores CASCADE;
DROP TABLE IF EXISTS assets CASCADE;
DROP TABLE IF EXISTS wallets CASCADE;
DROP TABLE IF EXISTS partnerships CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TABLE IF EXISTS retails CASCADE;
DROP TABLE IF EXISTS suppliers CASCADE;
DROP TABLE IF EXISTS tenants CASCADE;
DROP TYPE IF EXISTS execution_task_status;
DROP TYPE IF EXISTS execution_plan_status;
DROP TYPE IF EXISTS campaign_item_status;
DROP TYPE IF EXISTS campaign_status;
DROP TYPE IF EXISTS history_action;
DROP TYPE IF EXISTS asset_type;
DROP TYPE IF EXISTS jbp_status;
DROP TYPE IF EXISTS wallet_status;
DROP TYPE IF EXISTS partnership_status;
";
