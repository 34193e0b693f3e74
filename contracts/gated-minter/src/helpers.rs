use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_binary, Addr, Empty, QuerierWrapper, StdResult, WasmMsg};
use cw721::{Cw721QueryMsg, TokensResponse};
use cw721_base::{ExecuteMsg as Cw721ExecuteMsg, Extension, MintMsg};
use sg_std::CosmosMsg;

const TOKENS_PAGE_LIMIT: u32 = 30;

/// CollectionContract is a wrapper around the Addr of the cw721 collection this
/// minter issues into
#[cw_serde]
pub struct CollectionContract(pub Addr);

impl CollectionContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: Cw721ExecuteMsg<Extension, Empty>) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg)?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn mint(
        &self,
        token_id: String,
        owner: &Addr,
        token_uri: Option<String>,
    ) -> StdResult<CosmosMsg> {
        self.call(Cw721ExecuteMsg::Mint(MintMsg {
            token_id,
            owner: owner.to_string(),
            token_uri,
            extension: None,
        }))
    }

    /// Counts tokens held by `owner`, paging through the collection's `tokens` query
    pub fn balance_of(&self, querier: &QuerierWrapper, owner: &Addr) -> StdResult<u64> {
        let mut count = 0u64;
        let mut start_after = None;
        loop {
            let res: TokensResponse = querier.query_wasm_smart(
                self.addr(),
                &Cw721QueryMsg::Tokens {
                    owner: owner.to_string(),
                    start_after: start_after.clone(),
                    limit: Some(TOKENS_PAGE_LIMIT),
                },
            )?;
            match res.tokens.last() {
                Some(last) => {
                    count += res.tokens.len() as u64;
                    start_after = Some(last.clone());
                }
                None => return Ok(count),
            }
        }
    }
}
