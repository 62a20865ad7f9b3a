use crate::config::ContactConfig;

pub trait ContactGlobal:
	binary_helper::global::GlobalCtx
	+ binary_helper::global::GlobalConfigProvider<ContactConfig>
	+ binary_helper::global::GlobalDb
	+ binary_helper::global::GlobalConfig
	+ Send
	+ Sync
	+ 'static
{
}

impl<T> ContactGlobal for T where
	T: binary_helper::global::GlobalCtx
		+ binary_helper::global::GlobalConfigProvider<ContactConfig>
		+ binary_helper::global::GlobalDb
		+ binary_helper::global::GlobalConfig
		+ Send
		+ Sync
		+ 'static
{
}
