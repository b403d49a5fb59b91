use uuid::Uuid;

pub mod manager;
pub mod models;
pub mod schema;

pub mod about;
pub mod clients;
pub mod contacts;
pub mod projects;
pub mod services;
pub mod tickets;

/// Visibility scope applied uniformly by repositories over owned
/// collections. Owner absent means the row is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Unauthenticated viewer: public rows only
    Public,
    /// Authenticated client: own rows plus public rows
    Client(Uuid),
    /// Admin: no filter
    All,
}

impl Scope {
    pub fn can_view(&self, owner: Option<Uuid>) -> bool {
        match self {
            Scope::All => true,
            Scope::Client(id) => owner.is_none() || owner == Some(*id),
            Scope::Public => owner.is_none(),
        }
    }

    pub fn can_modify(&self, owner: Option<Uuid>) -> bool {
        match self {
            Scope::All => true,
            Scope::Client(id) => owner == Some(*id),
            Scope::Public => false,
        }
    }
}

/// True when a database error is a unique-constraint violation, used to
/// surface duplicate emails as 409 rather than a generic failure.
pub fn is_unique_violation(err: &manager::DatabaseError) -> bool {
    match err {
        manager::DatabaseError::Sqlx(sqlx::Error::Database(db_err)) => {
            db_err.code().as_deref() == Some("23505")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_scope_sees_only_ownerless_rows() {
        let owner = Uuid::new_v4();
        assert!(Scope::Public.can_view(None));
        assert!(!Scope::Public.can_view(Some(owner)));
        assert!(!Scope::Public.can_modify(None));
    }

    #[test]
    fn client_scope_sees_own_and_public_rows() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let scope = Scope::Client(me);
        assert!(scope.can_view(None));
        assert!(scope.can_view(Some(me)));
        assert!(!scope.can_view(Some(other)));
        assert!(scope.can_modify(Some(me)));
        assert!(!scope.can_modify(Some(other)));
        assert!(!scope.can_modify(None));
    }

    #[test]
    fn admin_scope_is_unfiltered() {
        let other = Uuid::new_v4();
        assert!(Scope::All.can_view(Some(other)));
        assert!(Scope::All.can_modify(None));
    }
}
