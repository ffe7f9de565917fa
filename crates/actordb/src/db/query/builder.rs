use crate::{
    config::ActorQueryConfig,
    db::{
        executor::{QueryTraceSink, SelectExecutor},
        predicate::{Predicate, normalize},
        query::{
            QueryError,
            plan::{OrderDirection, OrderSpec, Projection, SelectPlan},
            validate::{validate_config, validate_limit, validate_predicate},
        },
        response::{UserIdentities, UserNames},
        source::{ActorSource, Conds, field},
    },
    identity::{UserIdentity, normalize_user_name},
    value::Value,
};

/// Caller label used when none is supplied.
const DEFAULT_CALLER: &str = "UserSelectQueryBuilder";

///
/// UserSelectQueryBuilder
///
/// Fluent, by-value accumulator for one actor lookup. Every filter method
/// ANDs a condition onto the current predicate; sort and limit setters
/// overwrite. Terminal methods consume the builder, so a builder runs at
/// most once. Clone it first to run the same lookup twice.
///

pub struct UserSelectQueryBuilder<'a, S: ActorSource + ?Sized> {
    source: &'a S,
    config: ActorQueryConfig,
    predicate: Option<Predicate>,
    order: Option<OrderSpec>,
    limit: Option<u32>,
    caller: Option<String>,
    trace: Option<&'a dyn QueryTraceSink>,
}

impl<'a, S: ActorSource + ?Sized> UserSelectQueryBuilder<'a, S> {
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, ActorQueryConfig::default())
    }

    #[must_use]
    pub const fn with_config(source: &'a S, config: ActorQueryConfig) -> Self {
        Self {
            source,
            config,
            predicate: None,
            order: None,
            limit: None,
            caller: None,
            trace: None,
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Keep actors whose user id is one of `ids`.
    #[must_use]
    pub fn user_ids(self, ids: impl IntoUserIds) -> Self {
        let values = ids.into_user_ids().into_iter().map(Value::Uint).collect();

        self.filter(Predicate::in_(field::USER_ID, values))
    }

    /// Keep actors whose name is one of `names`, after canonicalization.
    #[must_use]
    pub fn user_names(self, names: impl IntoUserNames) -> Self {
        let mut canonical: Vec<String> = Vec::new();
        for raw in names.into_user_names() {
            if let Some(name) = normalize_user_name(&raw)
                && !canonical.contains(&name)
            {
                canonical.push(name);
            }
        }

        let values = canonical.into_iter().map(Value::Text).collect();

        self.filter(Predicate::in_(field::NAME, values))
    }

    /// Keep actors whose name starts with `prefix`. The prefix is matched
    /// literally and case-sensitively.
    #[must_use]
    pub fn user_name_prefix(self, prefix: impl Into<String>) -> Self {
        self.filter(Predicate::starts_with(field::NAME, prefix))
    }

    /// Keep registered actors only.
    #[must_use]
    pub fn registered(self) -> Self {
        self.filter(registered_predicate())
    }

    /// Keep unregistered actors only.
    #[must_use]
    pub fn anon(self) -> Self {
        self.filter(Predicate::eq(field::USER_ID, 0u64))
    }

    /// Keep registered actors whose name is not a temporary-account name.
    #[must_use]
    pub fn named(self) -> Self {
        let temp = self.temp_name_predicate();

        self.filter(registered_predicate() & Predicate::not(temp))
    }

    /// Keep registered actors whose name is a temporary-account name.
    #[must_use]
    pub fn temp(self) -> Self {
        let temp = self.temp_name_predicate();

        self.filter(registered_predicate() & temp)
    }

    /// `true` keeps hidden actors only; `false` drops them.
    #[must_use]
    pub fn hidden(self, hidden: bool) -> Self {
        let flagged = Predicate::eq(field::HIDDEN, true);
        if hidden {
            self.filter(flagged)
        } else {
            self.filter(Predicate::not(flagged))
        }
    }

    /// AND raw equality / membership conditions onto the lookup.
    #[must_use]
    pub fn conds(self, conds: impl Into<Conds>) -> Self {
        conds
            .into()
            .into_predicates()
            .fold(self, |builder, predicate| builder.filter(predicate))
    }

    fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(existing.and_with(predicate)),
            None => Some(predicate),
        };
        self
    }

    fn temp_name_predicate(&self) -> Predicate {
        Predicate::Or(
            self.config
                .temp_patterns()
                .map(|pattern| Predicate::like(field::NAME, pattern.prefix, pattern.suffix))
                .collect(),
        )
    }

    // ------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn order_by_name(mut self, direction: OrderDirection) -> Self {
        self.order = Some(OrderSpec::single(field::NAME, direction));
        self
    }

    #[must_use]
    pub fn order_by_user_id(mut self, direction: OrderDirection) -> Self {
        self.order = Some(OrderSpec::single(field::USER_ID, direction));
        self
    }

    #[must_use]
    pub fn caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Route this lookup's trace events to `sink` instead of `tracing`.
    #[must_use]
    pub const fn trace(mut self, sink: &'a dyn QueryTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    // ------------------------------------------------------------------
    // Planning
    // ------------------------------------------------------------------

    /// Validate and normalize without touching the source.
    pub fn plan(&self) -> Result<SelectPlan, QueryError> {
        self.build_plan(Projection::Identity)
    }

    fn build_plan(&self, projection: Projection) -> Result<SelectPlan, QueryError> {
        validate_config(&self.config)?;
        validate_limit(self.limit, &self.config)?;
        if let Some(predicate) = &self.predicate {
            validate_predicate(predicate)?;
        }

        let predicate = self
            .predicate
            .as_ref()
            .map_or(Predicate::True, normalize);
        let order = match projection {
            Projection::Identity => self.order.clone(),
            Projection::Names => None,
        };

        Ok(SelectPlan {
            predicate,
            order,
            limit: self.limit,
            projection,
            caller: self
                .caller
                .clone()
                .unwrap_or_else(|| DEFAULT_CALLER.to_string()),
        })
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Run the lookup and stream identities in result order.
    pub fn fetch_user_identities(self) -> Result<UserIdentities, QueryError> {
        let plan = self.build_plan(Projection::Identity)?;
        let rows = self.executor().execute(&plan)?;

        Ok(UserIdentities::new(rows))
    }

    /// Run the lookup with an implicit limit of one.
    ///
    /// A limit set by the caller is still validated before it is replaced.
    pub fn fetch_user_identity(self) -> Result<Option<UserIdentity>, QueryError> {
        validate_limit(self.limit, &self.config)?;
        let mut identities = self.limit(1).fetch_user_identities()?;

        Ok(identities.next())
    }

    /// Run the lookup for names only. Any sort order is ignored.
    pub fn fetch_user_names(self) -> Result<UserNames, QueryError> {
        let plan = self.build_plan(Projection::Names)?;
        let rows = self.executor().execute(&plan)?;

        Ok(UserNames::from_rows(rows))
    }

    fn executor(&self) -> SelectExecutor<'a, S> {
        SelectExecutor::new(self.source, self.trace)
    }
}

impl<S: ActorSource + ?Sized> Clone for UserSelectQueryBuilder<'_, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            config: self.config.clone(),
            predicate: self.predicate.clone(),
            order: self.order.clone(),
            limit: self.limit,
            caller: self.caller.clone(),
            trace: self.trace,
        }
    }
}

fn registered_predicate() -> Predicate {
    Predicate::ne(field::USER_ID, 0u64)
}

///
/// IntoUserIds
///
/// One user id or a collection of them.
///

pub trait IntoUserIds {
    fn into_user_ids(self) -> Vec<u64>;
}

impl IntoUserIds for u64 {
    fn into_user_ids(self) -> Vec<u64> {
        vec![self]
    }
}

impl IntoUserIds for Vec<u64> {
    fn into_user_ids(self) -> Vec<u64> {
        self
    }
}

impl IntoUserIds for &[u64] {
    fn into_user_ids(self) -> Vec<u64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoUserIds for [u64; N] {
    fn into_user_ids(self) -> Vec<u64> {
        self.to_vec()
    }
}

///
/// IntoUserNames
///
/// One user name or a collection of them.
///

pub trait IntoUserNames {
    fn into_user_names(self) -> Vec<String>;
}

impl IntoUserNames for &str {
    fn into_user_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoUserNames for String {
    fn into_user_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoUserNames for Vec<String> {
    fn into_user_names(self) -> Vec<String> {
        self
    }
}

impl IntoUserNames for Vec<&str> {
    fn into_user_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoUserNames for &[&str] {
    fn into_user_names(self) -> Vec<String> {
        self.iter().map(|name| (*name).to_string()).collect()
    }
}

impl<const N: usize> IntoUserNames for [&str; N] {
    fn into_user_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl<const N: usize> IntoUserNames for [String; N] {
    fn into_user_names(self) -> Vec<String> {
        self.into_iter().collect()
    }
}
