use std::cell::RefCell;
use std::rc::Rc;

/// Where the Firebase refresh token is kept between page loads.
///
/// Implementations swallow their own failures: a token that cannot be
/// stored only costs the user a sign-in after the next reload.
#[allow(async_fn_in_trait)]
pub trait TokenStore {
    async fn load(&self) -> Option<String>;

    async fn save(&self, refresh_token: &str);

    async fn clear(&self);
}

/// Keeps the refresh token in memory. Clones share the same slot, so a
/// second `FirebaseAuth` built from a clone sees what the first one saved.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(refresh_token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = Some(refresh_token.to_string());
        store
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let held = self.token.borrow().is_some();
        f.debug_struct("MemoryTokenStore").field("held", &held).finish()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<String> {
        self.token()
    }

    async fn save(&self, refresh_token: &str) {
        *self.token.borrow_mut() = Some(refresh_token.to_string());
    }

    async fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
