//! CLI tool for deploying and operating the Phantom USD protocol.

use phantom_stablecoin::engine::collateral_engine::CollateralEngine;
use phantom_stablecoin::engine::feed::StaticPriceFeed;
use phantom_stablecoin::token::PhantomUsd;
use phantom_stablecoin::tokens::CollateralToken;
use odra::casper_types::U256;
use odra::prelude::Addressable;
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the PUSD token.
pub struct TokenDeployScript;

impl DeployScript for TokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use odra::host::NoArgs;

        let _pusd = PhantomUsd::load_or_deploy(
            &env,
            NoArgs,
            container,
            300_000_000_000 // Gas limit for token deployment
        )?;

        Ok(())
    }
}

/// Deploys a demo collateral asset (WETH) and its price feed.
pub struct CollateralDeployScript;

impl DeployScript for CollateralDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use phantom_stablecoin::engine::feed::StaticPriceFeedInitArgs;
        use phantom_stablecoin::tokens::CollateralTokenInitArgs;

        let _weth = CollateralToken::load_or_deploy(
            &env,
            CollateralTokenInitArgs {
                name: String::from("Wrapped Ether"),
                symbol: String::from("WETH"),
                decimals: 18,
            },
            container,
            300_000_000_000
        )?;

        // $2000 starting quote, refreshed post-deploy via the set-price scenario
        let _feed = StaticPriceFeed::load_or_deploy(
            &env,
            StaticPriceFeedInitArgs {
                initial_answer: U256::from(2000u64)
                    * U256::from(1_000_000_000_000_000_000u128),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the collateral engine wired to the deployed token, collateral
/// and feed, then hands the PUSD mint/burn gate to the engine.
/// Requires the token and collateral scripts to have run first.
pub struct EngineDeployScript;

impl DeployScript for EngineDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use phantom_stablecoin::engine::collateral_engine::CollateralEngineInitArgs;

        let pusd = container.contract_ref::<PhantomUsd>(env)?;
        let weth = container.contract_ref::<CollateralToken>(env)?;
        let feed = container.contract_ref::<StaticPriceFeed>(env)?;

        let engine = CollateralEngine::load_or_deploy(
            &env,
            CollateralEngineInitArgs {
                synthetic_token: pusd.address().clone(),
                collateral_assets: vec![weth.address().clone()],
                price_feeds: vec![feed.address().clone()],
                liquidation_threshold: U256::from(50),
                liquidation_bonus: U256::from(10),
            },
            container,
            500_000_000_000 // Gas limit for engine deployment
        )?;

        // the engine becomes the sole authorized minter/burner
        let mut pusd = container.contract_ref::<PhantomUsd>(env)?;
        env.set_gas(10_000_000_000);
        pusd.transfer_ownership(engine.address().clone());

        Ok(())
    }
}

/// Deploys the complete protocol (token + collateral + engine).
pub struct ProtocolDeployScript;

impl DeployScript for ProtocolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        // Deploy the token first
        TokenDeployScript.deploy(env, container)?;

        // Then the collateral asset and its feed
        CollateralDeployScript.deploy(env, container)?;

        // Finally the engine
        EngineDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to push a new price to the deployed feed.
pub struct SetPriceScenario;

impl Scenario for SetPriceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "answer",
                "USD price per whole token, scaled by 1e18",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut feed = container.contract_ref::<StaticPriceFeed>(env)?;
        let answer = args.get_single::<U256>("answer")?;

        env.set_gas(10_000_000_000);
        feed.try_set_answer(answer)?;

        println!("Price updated successfully!");
        Ok(())
    }
}

impl ScenarioMetadata for SetPriceScenario {
    const NAME: &'static str = "set-price";
    const DESCRIPTION: &'static str = "Pushes a new answer to the collateral price feed";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the Phantom USD collateral engine")
        // Deploy scripts
        .deploy(TokenDeployScript)
        .deploy(CollateralDeployScript)
        .deploy(EngineDeployScript)
        .deploy(ProtocolDeployScript)
        // Contract references
        .contract::<PhantomUsd>()
        .contract::<CollateralToken>()
        .contract::<StaticPriceFeed>()
        .contract::<CollateralEngine>()
        // Scenarios
        .scenario(SetPriceScenario)
        .build()
        .run();
}
