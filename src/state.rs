use std::{ops::Deref, sync::Arc};

use crate::{
    book::service::BookService,
    error::{ErrorVerbosity, ErrorVerbosityProvider},
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, books: BookService) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                books,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    books: BookService,
}

impl ApiStateInner {
    pub fn books(&self) -> &BookService {
        &self.books
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
