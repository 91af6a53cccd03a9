//! Prompt templates for location insights

use estate_prompt::{JinjaTemplate, Result};

pub const SYSTEM: &str = "estate.system";
pub const DETAILED_ANALYSIS: &str = "estate.detailed_analysis";
pub const INVESTMENT_FOCUS: &str = "estate.investment_focus";
pub const FAMILY_FOCUS: &str = "estate.family_focus";
pub const CUSTOM_FOCUS: &str = "estate.custom_focus";
pub const COMPARATIVE: &str = "estate.comparative";
pub const MARKET_INSIGHTS: &str = "estate.market_insights";
pub const INVESTMENT_STRATEGY: &str = "estate.investment_strategy";

/// Create the analyst system prompt
pub fn system_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        SYSTEM,
        "You are an expert real estate analyst and urban planning consultant with extensive knowledge of Indian real estate markets, particularly Gujarat. Provide detailed, accurate, and actionable insights.",
    )
}

/// Create the general location analysis template
pub fn detailed_analysis_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        DETAILED_ANALYSIS,
        r"As a real estate expert and urban planner, provide a comprehensive analysis of {{ location }}.

Location Data:
{% for fact in facts %}
• {{ fact }}
{% endfor %}

Please provide:
1. **Location Overview**: Brief description and key characteristics
2. **Strengths Analysis**: Top 3-5 advantages of this location
3. **Areas for Improvement**: 2-3 aspects that could be better
4. **Investment Perspective**:
   - Short-term outlook (1-2 years)
   - Long-term potential (5-10 years)
   - Risk assessment
5. **Target Demographics**: Who would benefit most from living here?
6. **Comparison Context**: How does this compare to similar areas?
7. **Actionable Recommendations**: Specific advice for potential buyers/investors

Provide practical, data-driven insights in a professional yet accessible tone.",
    )
}

pub fn investment_focus_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        INVESTMENT_FOCUS,
        r"As an investment advisor specializing in real estate, analyze {{ location }} for investment potential.

Investment Metrics:
• Investment Score: {{ investment_score }}/10
• Current Price: ₹{{ price | thousands }}/sq ft
• Rental Yield: {{ rental_yield }}%
• Appreciation Rate: {{ appreciation_rate }}%
• Growth Potential: {{ future_growth }}
• Connectivity Score: {{ connectivity_score }}/10
{% for fact in facts %}
• {{ fact }}
{% endfor %}

Focus on:
1. **ROI Analysis**: Expected returns and timeline
2. **Risk Assessment**: Market risks and mitigation strategies
3. **Growth Drivers**: Factors that will drive property value appreciation
4. **Market Positioning**: How this investment compares to alternatives
5. **Entry Strategy**: Best approach for different investment sizes
6. **Exit Strategy**: When and how to realize gains

Provide specific, actionable investment advice.",
    )
}

pub fn family_focus_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        FAMILY_FOCUS,
        r"As a family relocation specialist, evaluate {{ location }} for families with children.

Family-Relevant Data:
• Safety Score: {{ safety_score }}/10
• Number of Schools: {{ schools }}
• Number of Hospitals: {{ hospitals }}
• Traffic Conditions: {{ traffic_score }}/10 (lower is better)
• Environment Quality: {{ environment_score }}/10
• Lifestyle Amenities: {{ lifestyle_score }}/10
{% for fact in facts %}
• {{ fact }}
{% endfor %}

Address:
1. **Education Quality**: Schools and educational opportunities
2. **Safety & Security**: Crime rates, neighborhood safety measures
3. **Community & Lifestyle**: Family-friendly amenities and activities
4. **Healthcare Access**: Medical facilities and emergency services
5. **Transportation**: Commute options and accessibility
6. **Cost of Living**: Budget considerations for families
7. **Long-term Suitability**: Growing with your family's needs

Provide family-centric recommendations and practical advice.",
    )
}

/// Create the free-focus template; `focus` is the caller's own wording
pub fn custom_focus_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        CUSTOM_FOCUS,
        r"As a real estate expert, analyze {{ location }} with focus on: {{ focus }}

Location Data:
{% for fact in facts %}
• {{ fact }}
{% endfor %}

Please provide comprehensive insights addressing the specified focus area.",
    )
}

pub fn comparative_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        COMPARATIVE,
        r"As a real estate expert, provide a comprehensive comparison of these {{ locations | length }} locations:
{% for loc in locations %}

**{{ loc.location }}:**
• Safety: {{ loc.safety_score }}/10
• Price: ₹{{ loc.price | thousands }}/sq ft
• Investment Score: {{ loc.investment_score }}/10
• Growth Potential: {{ loc.future_growth }}
• Schools: {{ loc.schools }}
• Connectivity: {{ loc.connectivity_score }}/10
{% endfor %}

Please provide:
1. **Comparative Overview**: Key differences and similarities
2. **Best For Investment**: Which location offers the best investment potential and why
3. **Best For Families**: Which location is most suitable for families with children
4. **Best Value for Money**: Which offers the best balance of features vs. cost
5. **Future Outlook**: Which has the strongest growth prospects
6. **Specific Recommendations**: Who should consider each location and why

Provide detailed reasoning for each recommendation.",
    )
}

pub fn market_insights_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        MARKET_INSIGHTS,
        r"As a real estate market analyst, provide current insights about the {% if city %}{{ city }} real estate market{% else %}Ahmedabad and Gandhinagar real estate markets{% endif %}:

1. **Market Trends**: Current state of the property market
2. **Price Movements**: Recent price trends and predictions
3. **Investment Hotspots**: Areas showing strong growth potential
4. **Buyer Preferences**: What buyers are currently looking for
5. **Infrastructure Impact**: How infrastructure development affects property values
6. **Risk Factors**: Potential challenges and how to mitigate them
7. **Future Outlook**: 2-3 year market predictions

Base your analysis on typical Gujarat real estate patterns and provide actionable insights.",
    )
}

pub fn investment_strategy_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        INVESTMENT_STRATEGY,
        r"As an investment advisor, create a personalized real estate investment strategy:

**Investment Profile:**
• Budget: ₹{{ budget | thousands }} ({{ budget_category }} investor)
• Goals: {{ goals }}
• Market Focus: Ahmedabad and Gandhinagar

Provide:
1. **Strategy Overview**: Recommended approach for this budget and goals
2. **Area Recommendations**: Which neighborhoods to focus on and why
3. **Property Type Suggestions**: Residential vs commercial considerations
4. **Timeline**: Short-term vs long-term investment approach
5. **Risk Management**: How to minimize investment risks
6. **Portfolio Diversification**: If applicable, how to spread investments
7. **Exit Strategy**: When and how to realize returns
8. **Action Plan**: Specific next steps to take

Provide practical, actionable advice tailored to the Indian real estate market.",
    )
}
