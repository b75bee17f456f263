//! Static shape checks for the public API: nothing here exercises runtime
//! behavior, only that these types carry the auto traits a caller handing
//! them across threads (e.g. a connection pool parsing messages off a
//! thread-pool) would expect.

use veriform::{Blob, Decoder, Object, ParseError, Parser, Value};

static_assertions::assert_impl_all!(Parser: Send, Sync, Clone);
static_assertions::assert_impl_all!(ParseError: Send, Sync);
static_assertions::assert_impl_all!(Object<'static>: Send, Sync);
static_assertions::assert_impl_all!(Value<'static>: Send, Sync);
static_assertions::assert_impl_all!(Blob<'static>: Send, Sync);
static_assertions::assert_impl_all!(Decoder<'static>: Send);
