//! Procedural macros of the `e2e` crate.
use proc_macro::TokenStream;


/// Defines an end-to-end test that injects funded accounts through its
/// parameters.
///
/// Every parameter must be of a type with an async, fallible `new`
/// constructor, such as `e2e::Account`. The test itself runs on a `tokio`
/// runtime.
///
/// # Examples
///
/// ```rust,ignore
/// #[e2e::test]
/// async fn adds_token(alice: Account) -> eyre::Result<()> {
///     let wrapper = deploy_wrapper(&alice).await?;
///     let receipt = receipt!(wrapper.addToken(token))?;
///     assert!(receipt.emits(NftWrapper::TokenAllowed { token }));
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, input: TokenStream) -> TokenStream {
    test::test(attr, input)
}
