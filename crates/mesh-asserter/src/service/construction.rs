use mesh_types::{print_struct, ConstructionParseResponse};

use super::Asserter;
use crate::domain::assertions::{account_array, account_identifier};
use crate::domain::errors::{AsserterError, WithContext};

impl Asserter {
    /// Validate a parse response.
    ///
    /// Operations are checked in construction context. A signed transaction
    /// must name its signers; an unsigned one must not.
    pub fn construction_parse_response(
        &self,
        response: &ConstructionParseResponse,
        signed: bool,
    ) -> Result<(), AsserterError> {
        if response.operations.is_empty() {
            return Err(AsserterError::ConstructionParseResponseOperationsEmpty);
        }

        self.operations(&response.operations, true)
            .with_context(|| "unable to parse operations")?;

        let signers = &response.account_identifier_signers;
        if signed && signers.is_empty() {
            return Err(AsserterError::ConstructionParseResponseSignersEmptyOnSignedTx);
        }

        if !signed && !signers.is_empty() {
            return Err(AsserterError::ConstructionParseResponseSignersNonEmptyOnUnsignedTx);
        }

        for signer in signers {
            account_identifier(Some(signer))
                .with_context(|| format!("signer {} is invalid", print_struct(signer)))?;
        }

        if !signers.is_empty() {
            account_array("signers", signers)?;
        }

        Ok(())
    }
}
