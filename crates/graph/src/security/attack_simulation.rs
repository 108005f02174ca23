use m365sec_core::CountRequestBuilder;

use crate::models::{
    AttackSimulationRoot, Simulation, SimulationAutomation, SimulationAutomationRun,
};

request_builder! {
    /// `/security/attackSimulation`
    AttackSimulationRequestBuilder("{+baseurl}/security/attackSimulation{?%24expand,%24select}")
        -> AttackSimulationRoot { get, update, delete }
}

request_builder! {
    SimulationsRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulations{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> Simulation { list, create }
}

request_builder! {
    SimulationItemRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulations/{simulation%2Did}{?%24expand,%24select}"
    ) -> Simulation { get, update, delete }
}

request_builder! {
    SimulationAutomationsRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulationAutomations{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> SimulationAutomation { list, create }
}

request_builder! {
    SimulationAutomationItemRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulationAutomations/{simulationAutomation%2Did}{?%24expand,%24select}"
    ) -> SimulationAutomation { get, update, delete }
}

request_builder! {
    RunsRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulationAutomations/{simulationAutomation%2Did}/runs{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}"
    ) -> SimulationAutomationRun { list }
}

request_builder! {
    RunItemRequestBuilder(
        "{+baseurl}/security/attackSimulation/simulationAutomations/{simulationAutomation%2Did}/runs/{simulationAutomationRun%2Did}{?%24expand,%24select}"
    ) -> SimulationAutomationRun { get }
}

impl AttackSimulationRequestBuilder {
    pub fn simulations(&self) -> SimulationsRequestBuilder {
        SimulationsRequestBuilder::new(self.base.child(SimulationsRequestBuilder::URL_TEMPLATE))
    }

    pub fn simulation_automations(&self) -> SimulationAutomationsRequestBuilder {
        SimulationAutomationsRequestBuilder::new(
            self.base.child(SimulationAutomationsRequestBuilder::URL_TEMPLATE),
        )
    }
}

impl SimulationsRequestBuilder {
    pub fn by_simulation_id(&self, simulation_id: &str) -> SimulationItemRequestBuilder {
        SimulationItemRequestBuilder::new(self.base.child_with_id(
            SimulationItemRequestBuilder::URL_TEMPLATE,
            "simulation%2Did",
            simulation_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/attackSimulation/simulations/$count{?%24filter,%24search}",
        ))
    }
}

impl SimulationAutomationsRequestBuilder {
    pub fn by_simulation_automation_id(
        &self,
        automation_id: &str,
    ) -> SimulationAutomationItemRequestBuilder {
        SimulationAutomationItemRequestBuilder::new(self.base.child_with_id(
            SimulationAutomationItemRequestBuilder::URL_TEMPLATE,
            "simulationAutomation%2Did",
            automation_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/attackSimulation/simulationAutomations/$count{?%24filter,%24search}",
        ))
    }
}

impl SimulationAutomationItemRequestBuilder {
    pub fn runs(&self) -> RunsRequestBuilder {
        RunsRequestBuilder::new(self.base.child(RunsRequestBuilder::URL_TEMPLATE))
    }
}

impl RunsRequestBuilder {
    pub fn by_simulation_automation_run_id(&self, run_id: &str) -> RunItemRequestBuilder {
        RunItemRequestBuilder::new(self.base.child_with_id(
            RunItemRequestBuilder::URL_TEMPLATE,
            "simulationAutomationRun%2Did",
            run_id,
        ))
    }

    pub fn count(&self) -> CountRequestBuilder {
        CountRequestBuilder::new(self.base.child(
            "{+baseurl}/security/attackSimulation/simulationAutomations/{simulationAutomation%2Did}/runs/$count{?%24filter,%24search}",
        ))
    }
}
